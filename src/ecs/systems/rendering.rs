//! Systems for syncing ECS state to the scene backend

use bevy::prelude::*;
use tracing::debug;

use super::super::animation::{Animation, AnimationMode, AnimationTimer};
use super::super::catalog::AnimationCatalog;
use super::super::components::*;
use crate::SceneState;

/// Pushes entity positions to the backend, keeping child sprites and labels
/// riding at their fixed offsets.
pub fn sync_scene_positions(
    moved: Query<(Entity, &Position, &SpriteInstance), Changed<Position>>,
    children: Query<&Children>,
    child_sprites: Query<(&SpriteInstance, &SpriteOffset), Without<Position>>,
    child_labels: Query<(&LabelInstance, &SpriteOffset)>,
    mut scene: ResMut<SceneState>,
) {
    for (entity, position, sprite) in moved.iter() {
        let scene_pos = position.to_vec2() * TILE_SIZE;
        scene.backend.set_position(sprite.handle, scene_pos);

        let Ok(child_entities) = children.get(entity) else {
            continue;
        };
        for child in child_entities.iter() {
            if let Ok((child_sprite, offset)) = child_sprites.get(child) {
                scene
                    .backend
                    .set_position(child_sprite.handle, scene_pos + offset.0);
            }
            if let Ok((label, offset)) = child_labels.get(child) {
                scene
                    .backend
                    .set_label_position(label.handle, scene_pos + offset.0);
            }
        }
    }
}

/// Reverts a base sprite to the idle frame for its current facing once a
/// non-looping clip has played out. An idle entity never lingers on a
/// mid-stride frame.
pub fn base_animation_complete_system(
    mut commands: Commands,
    query: Query<(
        Entity,
        &EntityKind,
        &DirectionalState,
        &SpriteInstance,
        &Animation,
    )>,
    catalog: Res<AnimationCatalog>,
    mut scene: ResMut<SceneState>,
) {
    for (entity, kind, facing, sprite, animation) in query.iter() {
        if animation.mode != AnimationMode::Finished {
            continue;
        }
        let frame = catalog.base_frame(&kind.0, facing.direction);
        scene.backend.set_frame(sprite.handle, &frame);
        commands.entity(entity).remove::<(Animation, AnimationTimer)>();
        debug!("Animation {:?} completed, resting on {frame:?}", animation.clip);
    }
}

/// Auto-hides one-shot overlays when their clip finishes: transient
/// feedback (a regen tick) clears itself, sustained conditions keep looping
/// until the server says otherwise.
pub fn overlay_animation_complete_system(
    mut commands: Commands,
    query: Query<(Entity, &StatusOverlay, &SpriteInstance, &Animation)>,
    mut scene: ResMut<SceneState>,
) {
    for (entity, overlay, sprite, animation) in query.iter() {
        if animation.mode != AnimationMode::Finished {
            continue;
        }
        scene.backend.set_visible(sprite.handle, false);
        scene.backend.set_frame(sprite.handle, &overlay.0.first_frame());
        commands.entity(entity).remove::<(Animation, AnimationTimer)>();
    }
}
