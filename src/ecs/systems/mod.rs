//! ECS systems organized by domain
//!
//! Systems are grouped into logical modules and execute in a well-defined
//! order managed by [`GameSet`].

mod effects;
mod entities;
mod movement;
mod rendering;

pub use effects::*;
pub use entities::*;
pub use movement::*;
pub use rendering::*;

use bevy::prelude::*;

/// Core game loop system sets with explicit ordering.
///
/// The execution order is:
/// 1. **EventProcessing** - Fold HUD/session/hover events into state
/// 2. **Spawning** - Spawn and despawn entity visuals from events
/// 3. **Movement** - Apply walk/turn/stop and status updates, start tweens
/// 4. **Physics** - Advance tweens, apply interpolated positions
/// 5. **Animation** - Tick animation shadows, advance frames
/// 6. **RenderSync** - Push ECS state to the scene backend
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Process incoming events (HUD, session, pointer)
    EventProcessing,
    /// Spawn new entity visuals from Spawn/Remove events
    Spawning,
    /// Process movement and status events, insert movement tweens
    Movement,
    /// Advance tweens, apply interpolated positions
    Physics,
    /// Tick animation timers, advance frames
    Animation,
    /// Sync ECS components to the scene backend
    RenderSync,
}

/// Configure the system set ordering for the game loop
pub fn configure_game_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            GameSet::EventProcessing,
            GameSet::Spawning.after(GameSet::EventProcessing),
            GameSet::Movement.after(GameSet::Spawning),
            GameSet::Physics.after(GameSet::Movement),
            GameSet::Animation.after(GameSet::Physics),
            GameSet::RenderSync.after(GameSet::Animation),
        ),
    );
}
