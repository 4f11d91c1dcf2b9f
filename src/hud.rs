//! Bridge between the event bus and the HUD panel state.
//!
//! The panel tree itself (out of scope) renders from [`HudState`]'s
//! snapshot; this side only folds events into it.

use bevy::prelude::*;
use game_ui::{HudEvent, HudSnapshot};
use tracing::debug;

use crate::ecs::systems::GameSet;

#[derive(Resource, Default)]
pub struct HudState {
    pub snapshot: HudSnapshot,
}

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<HudEvent>()
            .init_resource::<HudState>()
            .add_systems(Update, route_hud_events.in_set(GameSet::EventProcessing));
    }
}

fn route_hud_events(mut events: MessageReader<HudEvent>, mut hud: ResMut<HudState>) {
    for event in events.read() {
        hud.snapshot.apply(event);
        debug!("HUD event {event:?} -> panel {:?}", hud.snapshot.shown_panel);
    }
}
