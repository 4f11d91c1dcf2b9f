use bevy::prelude::{Entity, Message};

use crate::ecs::components::{EffectKind, IconKind};

// === Network Events ===

/// Server-originated entity updates, decoded by the (external) network
/// layer and published here in arrival order.
#[derive(Debug, Clone, Message)]
pub enum EntityEvent {
    Spawn(SpawnEntity),
    Remove { id: u32 },
    Walk(EntityWalk),
    /// Raw direction token as sent by the server ("u"/"d"/"l"/"r").
    Turn { id: u32, direction: String },
    Stopped { id: u32 },
    StatusEffect { id: u32, effect: EffectKind, active: bool, looping: bool },
    StatusIcon { id: u32, icon: IconKind, active: bool },
    Damaged { id: u32, amount: u32 },
}

/// One-time snapshot an entity visual is constructed from.
#[derive(Debug, Clone)]
pub struct SpawnEntity {
    pub id: u32,
    /// Entity type name in the animation catalog.
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub direction: String,
    /// Overrides the type's label color (clan colors and the like).
    pub display_name_color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EntityWalk {
    pub id: u32,
    pub to: (f32, f32),
    pub direction: String,
    /// False for teleports/repositions: position updates but no walk
    /// animation may play.
    pub play_animation: bool,
}

// === Session Events ===

#[derive(Debug, Clone, Message)]
pub enum SessionEvent {
    Connected,
    Disconnected,
}

// === Interaction Events ===

/// Published by the input adapter when the pointer moves over an entity
/// (`Some`) or off onto empty ground (`None`).
#[derive(Debug, Clone, Message)]
pub struct EntityHoverEvent {
    pub entity: Option<Entity>,
}
