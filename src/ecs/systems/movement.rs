//! Movement and facing systems

use bevy::prelude::*;
use tracing::debug;

use super::super::animation::{Animation, AnimationBundle, AnimationTimer};
use super::super::catalog::AnimationCatalog;
use super::super::components::*;
use crate::events::EntityEvent;
use crate::SceneState;

/// Applies server walk/turn/stop events to entity visuals.
///
/// Exactly one base clip is active per entity at any time: a walk replaces
/// the previous animation shadow wholesale, and every clip change is a
/// single `play_clip`/`set_frame` call on the backend.
pub fn entity_motion_system(
    mut commands: Commands,
    mut entity_events: MessageReader<EntityEvent>,
    mut moved_query: Query<(
        Entity,
        &EntityId,
        &EntityKind,
        &mut DirectionalState,
        &mut Position,
        &SpriteInstance,
    )>,
    catalog: Res<AnimationCatalog>,
    mut scene: ResMut<SceneState>,
) {
    for event in entity_events.read() {
        match event {
            EntityEvent::Walk(walk) => {
                let mut found = false;
                for (entity, entity_id, kind, mut facing, mut position, sprite) in
                    moved_query.iter_mut()
                {
                    if entity_id.id != walk.id {
                        continue;
                    }
                    found = true;

                    facing.set_direction(&walk.direction);

                    if walk.play_animation {
                        facing.moving = true;
                        let tween_duration = match catalog.animation_set(&kind.0, facing.direction)
                        {
                            Some(set) => {
                                scene.backend.play_clip(sprite.handle, &set.key, false);
                                commands.entity(entity).insert(AnimationBundle::from_set(set));
                                set.duration_ms as f32 / 1000.0
                            }
                            // Types without an animation set slide on their
                            // static frame.
                            None => 0.5,
                        };
                        commands.entity(entity).insert(MovementTween {
                            start: position.to_vec2(),
                            end: Vec2::new(walk.to.0, walk.to.1),
                            elapsed: 0.0,
                            duration: tween_duration,
                        });
                    } else {
                        // Reposition (teleport/map change): snap, and leave
                        // the displayed clip state untouched. Playing a walk
                        // animation here looks wrong.
                        *position = Vec2::new(walk.to.0, walk.to.1).into();
                        commands.entity(entity).remove::<MovementTween>();
                    }
                    break;
                }
                if !found {
                    debug!("Walk for unknown entity id {}", walk.id);
                }
            }
            EntityEvent::Turn { id, direction } => {
                let mut found = false;
                for (entity, entity_id, kind, mut facing, _position, sprite) in
                    moved_query.iter_mut()
                {
                    if entity_id.id != *id {
                        continue;
                    }
                    found = true;

                    facing.set_direction(direction);

                    if facing.moving {
                        match catalog.animation_set(&kind.0, facing.direction) {
                            // Keep playing if the animation loops.
                            Some(set) if set.looping => {
                                scene.backend.play_clip(sprite.handle, &set.key, false);
                                commands.entity(entity).insert(AnimationBundle::from_set(set));
                            }
                            // One-shot action clips must not smear across a
                            // direction change; stop them outright.
                            _ => {
                                scene.backend.stop_clip(sprite.handle);
                                commands.entity(entity).remove::<(Animation, AnimationTimer)>();
                            }
                        }
                    } else {
                        let frame = catalog.base_frame(&kind.0, facing.direction);
                        scene.backend.set_frame(sprite.handle, &frame);
                    }
                    break;
                }
                if !found {
                    debug!("Turn for unknown entity id {id}");
                }
            }
            EntityEvent::Stopped { id } => {
                let mut found = false;
                for (entity, entity_id, kind, mut facing, _position, sprite) in
                    moved_query.iter_mut()
                {
                    if entity_id.id != *id {
                        continue;
                    }
                    found = true;

                    facing.moving = false;
                    commands.entity(entity).remove::<(Animation, AnimationTimer)>();
                    let frame = catalog.base_frame(&kind.0, facing.direction);
                    scene.backend.set_frame(sprite.handle, &frame);
                    break;
                }
                if !found {
                    debug!("Stopped for unknown entity id {id}");
                }
            }
            _ => {}
        }
    }
}

/// Advances movement tweens using linear interpolation.
/// Removes the tween component when complete.
pub fn movement_tween_system(
    time: Res<Time>,
    mut query: Query<(Entity, &mut Position, &mut MovementTween)>,
    mut commands: Commands,
) {
    for (entity, mut pos, mut tween) in query.iter_mut() {
        tween.elapsed += time.delta().as_secs_f32();
        let t = (tween.elapsed / tween.duration).clamp(0.0, 1.0);

        *pos = tween.start.lerp(tween.end, t).into();

        if tween.elapsed >= tween.duration {
            *pos = tween.end.into();
            commands.entity(entity).remove::<MovementTween>();
        }
    }
}
