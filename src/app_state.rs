use bevy::prelude::*;
use tracing::info;

use crate::ecs::components::SessionScoped;
use crate::events::SessionEvent;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    InGame,
    Disconnected,
}

/// Follows the session layer's connect/disconnect notifications.
pub fn session_transition_system(
    mut session_events: MessageReader<SessionEvent>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for event in session_events.read() {
        match event {
            SessionEvent::Connected => next_state.set(AppState::InGame),
            SessionEvent::Disconnected => next_state.set(AppState::Disconnected),
        }
    }
}

/// Despawns every session-scoped visual wholesale. Scene resources are
/// released through the component removal hooks as each entity goes down.
pub fn cleanup_session_world(
    mut commands: Commands,
    scoped: Query<Entity, With<SessionScoped>>,
) {
    let mut count = 0usize;
    for entity in scoped.iter() {
        commands.entity(entity).despawn();
        count += 1;
    }
    if count > 0 {
        info!("Despawned {count} session-scoped entities on disconnect");
    }
}
