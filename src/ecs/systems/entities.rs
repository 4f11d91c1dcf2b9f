//! Entity visual spawning and despawning systems

use bevy::prelude::*;
use glam::Vec2;
use rendering::MISSING_FRAME;
use tracing::{debug, warn};

use super::super::catalog::{AnimationCatalog, GAME_ATLAS};
use super::super::components::*;
use crate::events::{EntityEvent, SpawnEntity};
use crate::text::TextDefs;
use crate::SceneState;

/// Spawns and despawns entity visuals from network events.
pub fn spawn_entities_system(
    mut commands: Commands,
    mut entity_events: MessageReader<EntityEvent>,
    entity_query: Query<(Entity, &EntityId)>,
    catalog: Res<AnimationCatalog>,
    text: Res<TextDefs>,
    mut scene: ResMut<SceneState>,
) {
    for event in entity_events.read() {
        match event {
            EntityEvent::Spawn(spawn) => {
                spawn_entity_visual(&mut commands, spawn, &catalog, &text, &mut scene);
            }
            EntityEvent::Remove { id } => {
                let mut found = false;
                for (entity, entity_id) in entity_query.iter() {
                    if entity_id.id == *id {
                        commands.entity(entity).despawn();
                        found = true;
                        break;
                    }
                }
                if !found {
                    // Removal may race ahead of spawn delivery; not an error.
                    debug!("Remove for unknown entity id {id}");
                }
            }
            _ => {}
        }
    }
}

/// Removes duplicate entities when a new entity with the same ID is added.
/// This handles reconnection scenarios where stale visuals might remain.
pub fn dedupe_entities_by_id(
    mut commands: Commands,
    new_entities_query: Query<(Entity, &EntityId), Added<EntityId>>,
    all_entities_query: Query<(Entity, &EntityId)>,
) {
    for (entity, id) in new_entities_query.iter() {
        for (other_entity, other_id) in all_entities_query.iter() {
            if other_id.id == id.id && other_entity != entity {
                commands.entity(other_entity).despawn();
            }
        }
    }
}

fn spawn_entity_visual(
    commands: &mut Commands,
    spawn: &SpawnEntity,
    catalog: &AnimationCatalog,
    text: &TextDefs,
    scene: &mut SceneState,
) {
    let descriptor = catalog.get_type(&spawn.kind);
    if descriptor.is_none() {
        warn!(
            "Spawn for unregistered entity type {:?} (id {}), using placeholder",
            spawn.kind, spawn.id
        );
    }

    let direction = Direction::from_token(&spawn.direction);
    let mut frame = catalog.base_frame(&spawn.kind, direction);
    if !scene.backend.has_frame(GAME_ATLAS, &frame) {
        warn!("Frame {frame:?} missing from atlas {GAME_ATLAS:?}, using placeholder");
        frame = MISSING_FRAME.to_string();
    }

    let position = Vec2::new(spawn.x, spawn.y);
    let scene_pos = position * TILE_SIZE;

    let backend = scene.backend.as_mut();
    let base = backend.create_sprite(GAME_ATLAS, &frame);
    backend.set_origin(base, Vec2::splat(0.5));
    backend.set_position(base, scene_pos);
    let scale = descriptor.map(|d| d.scale).unwrap_or(1.0);
    if scale != 1.0 {
        backend.set_scale(base, scale);
    }

    // Display name, resolved through the text definitions. The label starts
    // hidden and is revealed on hover.
    let label = descriptor.and_then(|d| d.display_name_key.as_deref()).map(|key| {
        let color = spawn
            .display_name_color
            .as_deref()
            .or_else(|| descriptor.and_then(|d| d.name_color.as_deref()));
        let handle = backend.create_label(&text.get(key), color);
        backend.set_label_visible(handle, false);
        backend.set_label_position(handle, scene_pos + NAME_LABEL_OFFSET);
        handle
    });

    let marker = backend.create_label("", None);
    backend.set_label_visible(marker, false);
    backend.set_label_position(marker, scene_pos + DAMAGE_MARKER_OFFSET);

    let mut overlays = Vec::with_capacity(EffectKind::ALL.len());
    for effect in EffectKind::ALL {
        let sprite = backend.create_sprite(GAME_ATLAS, &effect.first_frame());
        backend.set_origin(sprite, Vec2::splat(0.5));
        backend.set_visible(sprite, false);
        backend.set_position(sprite, scene_pos + OVERLAY_OFFSET);
        overlays.push((effect, sprite));
    }

    let mut icons = Vec::with_capacity(2);
    for (icon, offset) in [
        (IconKind::Curse, CURSE_ICON_OFFSET),
        (IconKind::Enchantment, ENCHANTMENT_ICON_OFFSET),
    ] {
        let sprite = backend.create_sprite(GAME_ATLAS, icon.frame());
        backend.set_origin(sprite, Vec2::splat(0.5));
        backend.set_visible(sprite, false);
        backend.set_position(sprite, scene_pos + offset);
        icons.push((icon, offset, sprite));
    }

    commands
        .spawn(EntityVisualBundle {
            entity_id: EntityId { id: spawn.id },
            kind: EntityKind(spawn.kind.clone()),
            position: position.into(),
            directional: DirectionalState::new(direction),
            sprite: SpriteInstance { handle: base },
            scoped: SessionScoped,
        })
        .with_children(|parent| {
            if let Some(handle) = label {
                parent.spawn((
                    NameLabel,
                    LabelInstance { handle },
                    SpriteOffset(NAME_LABEL_OFFSET),
                ));
            }
            parent.spawn((
                DamageMarker,
                LabelInstance { handle: marker },
                SpriteOffset(DAMAGE_MARKER_OFFSET),
            ));
            for (effect, sprite) in overlays {
                parent.spawn((
                    StatusOverlay(effect),
                    SpriteInstance { handle: sprite },
                    SpriteOffset(OVERLAY_OFFSET),
                ));
            }
            for (icon, offset, sprite) in icons {
                parent.spawn((
                    StatusIcon(icon),
                    SpriteInstance { handle: sprite },
                    SpriteOffset(offset),
                ));
            }
        });
}
