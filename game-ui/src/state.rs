use bevy::prelude::Message;
use serde::{Deserialize, Serialize};

/// Which HUD panel, if any, is currently open. At most one is shown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    None,
    CreateAccount,
    Account,
    Respawn,
    Dungeon,
    Stats,
    Tasks,
}

impl Default for PanelKind {
    fn default() -> Self {
        PanelKind::None
    }
}

/// A dungeon portal the player pressed; the dungeon panel loads from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DungeonPortal {
    pub id: u32,
    pub name: String,
}

/// HUD-facing events published by the session/network layers and by the
/// panel buttons themselves.
#[derive(Debug, Clone, Message)]
pub enum HudEvent {
    LoggedIn(bool),
    HitpointsValue(i32),
    PositionValue { x: f32, y: f32 },
    DungeonPortalPressed(DungeonPortal),
    TrackTask(Option<String>),
    OpenPanel(PanelKind),
    ClosePanel,
    /// The exit button opens the account panel when logged in, otherwise
    /// the create-account panel.
    ExitButtonPressed,
}

/// Serializable snapshot of the HUD the panel tree renders from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HudSnapshot {
    pub shown_panel: PanelKind,
    pub logged_in: bool,
    pub hitpoints: i32,
    pub target_portal: Option<DungeonPortal>,
    pub tracked_task: Option<String>,
}

impl HudSnapshot {
    /// Folds one event into the snapshot.
    pub fn apply(&mut self, event: &HudEvent) {
        match event {
            HudEvent::LoggedIn(logged_in) => {
                self.logged_in = *logged_in;
                // If they were looking at the create account panel,
                // switch to the account panel.
                if *logged_in && self.shown_panel == PanelKind::CreateAccount {
                    self.shown_panel = PanelKind::Account;
                }
            }
            HudEvent::HitpointsValue(new) => {
                self.hitpoints = *new;
                // If the player died, show the respawn panel.
                if *new <= 0 {
                    self.shown_panel = PanelKind::Respawn;
                }
            }
            HudEvent::PositionValue { .. } => {
                self.shown_panel = PanelKind::None;
            }
            HudEvent::DungeonPortalPressed(portal) => {
                // Set the target portal before changing the panel, or it
                // won't know what info to load.
                self.target_portal = Some(portal.clone());
                self.shown_panel = PanelKind::Dungeon;
            }
            HudEvent::TrackTask(task) => {
                self.tracked_task = task.clone();
            }
            HudEvent::OpenPanel(panel) => {
                self.shown_panel = *panel;
            }
            HudEvent::ClosePanel => {
                self.shown_panel = PanelKind::None;
            }
            HudEvent::ExitButtonPressed => {
                self.shown_panel = if self.logged_in {
                    PanelKind::Account
                } else {
                    PanelKind::CreateAccount
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_while_create_account_open_switches_to_account() {
        let mut hud = HudSnapshot::default();
        hud.apply(&HudEvent::ExitButtonPressed);
        assert_eq!(hud.shown_panel, PanelKind::CreateAccount);

        hud.apply(&HudEvent::LoggedIn(true));
        assert_eq!(hud.shown_panel, PanelKind::Account);
    }

    #[test]
    fn movement_closes_any_open_panel() {
        let mut hud = HudSnapshot::default();
        hud.apply(&HudEvent::OpenPanel(PanelKind::Stats));
        hud.apply(&HudEvent::PositionValue { x: 4.0, y: 2.0 });
        assert_eq!(hud.shown_panel, PanelKind::None);
    }

    #[test]
    fn death_opens_respawn_panel() {
        let mut hud = HudSnapshot::default();
        hud.apply(&HudEvent::HitpointsValue(35));
        assert_eq!(hud.shown_panel, PanelKind::None);

        hud.apply(&HudEvent::HitpointsValue(0));
        assert_eq!(hud.shown_panel, PanelKind::Respawn);
    }

    #[test]
    fn portal_is_stored_before_dungeon_panel_opens() {
        let mut hud = HudSnapshot::default();
        hud.apply(&HudEvent::DungeonPortalPressed(DungeonPortal {
            id: 7,
            name: "Bone crypt".to_string(),
        }));
        assert_eq!(hud.shown_panel, PanelKind::Dungeon);
        assert_eq!(hud.target_portal.as_ref().map(|p| p.id), Some(7));
    }

    #[test]
    fn exit_button_depends_on_login_state() {
        let mut hud = HudSnapshot::default();
        hud.apply(&HudEvent::ExitButtonPressed);
        assert_eq!(hud.shown_panel, PanelKind::CreateAccount);

        hud.apply(&HudEvent::LoggedIn(true));
        hud.apply(&HudEvent::ClosePanel);
        hud.apply(&HudEvent::ExitButtonPressed);
        assert_eq!(hud.shown_panel, PanelKind::Account);
    }
}
