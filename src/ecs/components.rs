use bevy::ecs::lifecycle::HookContext;
use bevy::ecs::world::DeferredWorld;
use bevy::prelude::*;
use glam::Vec2;
use rendering::{LabelHandle, SpriteHandle};

/// World-to-scene scale: one tile in scene pixels.
pub const TILE_SIZE: f32 = 32.0;

/// Scene offsets of the child sprites, relative to the entity's position.
pub const OVERLAY_OFFSET: Vec2 = Vec2::new(TILE_SIZE / 2.0, TILE_SIZE / 2.0);
pub const CURSE_ICON_OFFSET: Vec2 = Vec2::new(TILE_SIZE / 2.0 - 6.0, -6.0);
pub const ENCHANTMENT_ICON_OFFSET: Vec2 = Vec2::new(TILE_SIZE / 2.0 + 6.0, -6.0);
pub const NAME_LABEL_OFFSET: Vec2 = Vec2::new(0.0, -12.0);
pub const DAMAGE_MARKER_OFFSET: Vec2 = Vec2::new(0.0, -24.0);

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for Position {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

// Tween (interpolated) movement between two tile positions.
// Added on walk; removed when the step completes or the entity teleports.
#[derive(Component, Debug)]
pub struct MovementTween {
    pub start: Vec2,
    pub end: Vec2,
    pub elapsed: f32,
    pub duration: f32, // seconds
}

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Maps a server direction token onto a facing. Unknown or garbled
    /// tokens resolve to `Right`; the server is never second-guessed with
    /// an error.
    pub fn from_token(token: &str) -> Self {
        match token {
            "u" => Direction::Up,
            "d" => Direction::Down,
            "l" => Direction::Left,
            _ => Direction::Right,
        }
    }

    /// Name used in clip keys and frame names ("knight-up-1").
    pub fn suffix(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Current facing and whether the entity is in its moving state. Owned by
/// the motion systems; read by render sync every frame.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct DirectionalState {
    pub direction: Direction,
    pub moving: bool,
}

impl DirectionalState {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            moving: false,
        }
    }

    /// Applies a direction token, returning true if the facing changed.
    pub fn set_direction(&mut self, token: &str) -> bool {
        let direction = Direction::from_token(token);
        let changed = self.direction != direction;
        self.direction = direction;
        changed
    }
}

#[derive(Component)]
pub struct EntityId {
    pub id: u32,
}

/// Entity type name, resolved against the animation catalog.
#[derive(Component, Debug, Clone)]
pub struct EntityKind(pub String);

/// Status-effect overlays layered over an entity. Each gets its own child
/// sprite and toggles independently of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    EnergyRegen,
    HealthRegen,
    Cured,
    Poison,
    Burn,
}

impl EffectKind {
    pub const ALL: [EffectKind; 5] = [
        EffectKind::EnergyRegen,
        EffectKind::HealthRegen,
        EffectKind::Cured,
        EffectKind::Poison,
        EffectKind::Burn,
    ];

    pub fn clip_key(self) -> &'static str {
        match self {
            EffectKind::EnergyRegen => "energy-regen",
            EffectKind::HealthRegen => "health-regen",
            EffectKind::Cured => "cured",
            EffectKind::Poison => "poison",
            EffectKind::Burn => "burn",
        }
    }

    /// Frame the overlay sprite rests on while hidden.
    pub fn first_frame(self) -> String {
        format!("{}-effect-1", self.clip_key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Curse,
    Enchantment,
}

impl IconKind {
    pub fn frame(self) -> &'static str {
        match self {
            IconKind::Curse => "curse-icon",
            IconKind::Enchantment => "enchantment-icon",
        }
    }
}

/// Child sprite marker for one status-effect overlay.
#[derive(Component, Debug, Clone, Copy)]
pub struct StatusOverlay(pub EffectKind);

/// Child sprite marker for the curse/enchantment icons.
#[derive(Component, Debug, Clone, Copy)]
pub struct StatusIcon(pub IconKind);

/// Child label marker for the entity's display name.
#[derive(Component)]
pub struct NameLabel;

/// Child label marker for the damage-marker slot.
#[derive(Component)]
pub struct DamageMarker;

/// Transient flash of the damage marker; expires via timer.
#[derive(Component)]
pub struct DamageFlash {
    pub timer: Timer,
}

/// Scene offset of a child sprite/label relative to the entity position.
#[derive(Component, Debug, Clone, Copy)]
pub struct SpriteOffset(pub Vec2);

// Marker component: entity belongs to the live session and is despawned
// wholesale on disconnect, via a single query instead of per-type queries.
#[derive(Component)]
pub struct SessionScoped;

#[derive(Component)]
#[component(on_remove = cleanup_sprite_instance)]
pub struct SpriteInstance {
    pub handle: SpriteHandle,
}

#[derive(Component)]
#[component(on_remove = cleanup_label_instance)]
pub struct LabelInstance {
    pub handle: LabelHandle,
}

#[derive(Bundle)]
pub struct EntityVisualBundle {
    pub entity_id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
    pub directional: DirectionalState,
    pub sprite: SpriteInstance,
    pub scoped: SessionScoped,
}

// --- Component removal hooks ---
// These run automatically when the component is removed or the entity
// despawns, so scene resources are released atomically with the visual.
fn cleanup_sprite_instance(mut world: DeferredWorld, ctx: HookContext) {
    let handle = if let Some(instance) = world.get::<SpriteInstance>(ctx.entity) {
        instance.handle
    } else {
        return;
    };
    let Some(mut scene) = world.get_resource_mut::<crate::SceneState>() else {
        return;
    };
    scene.backend.destroy_sprite(handle);
}

fn cleanup_label_instance(mut world: DeferredWorld, ctx: HookContext) {
    let handle = if let Some(instance) = world.get::<LabelInstance>(ctx.entity) {
        instance.handle
    } else {
        return;
    };
    let Some(mut scene) = world.get_resource_mut::<crate::SceneState>() else {
        return;
    };
    scene.backend.destroy_label(handle);
}
