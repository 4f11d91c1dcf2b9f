use bevy::prelude::*;

pub use game_ui::{DungeonPortal, HudEvent, HudSnapshot, PanelKind};
pub use rendering::{RecordingScene, SceneBackend};

pub mod app_state;
pub mod ecs;
pub mod events;
pub mod game_data;
pub mod hud;
pub mod resources;
pub mod text;

pub use hud::HudState;
pub use resources::SceneState;

pub struct CoreEventsPlugin;

impl Plugin for CoreEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<events::EntityEvent>()
            .add_message::<events::SessionEvent>()
            // Interaction events
            .add_message::<events::EntityHoverEvent>();
    }
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            bevy::state::app::StatesPlugin,
            CoreEventsPlugin,
            hud::HudPlugin,
            ecs::plugin::GamePlugin,
        ))
        .init_state::<app_state::AppState>()
        .add_systems(
            OnExit(app_state::AppState::InGame),
            app_state::cleanup_session_world,
        );
    }
}
