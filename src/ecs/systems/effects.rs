//! Status effect systems (overlays, icons, damage markers)

use bevy::prelude::*;
use tracing::debug;

use super::super::animation::{Animation, AnimationBundle, AnimationTimer};
use super::super::components::*;
use crate::events::EntityEvent;
use crate::SceneState;

/// Toggles status overlays and icons from server condition events.
///
/// An overlay's visibility and playback always change together: showing it
/// starts the two-frame clip, hiding it stops the clip in the same pass.
/// Overlays are fully independent; several may be active at once.
pub fn status_effect_system(
    mut commands: Commands,
    mut entity_events: MessageReader<EntityEvent>,
    targets: Query<(Entity, &EntityId)>,
    children: Query<&Children>,
    overlays: Query<(Entity, &StatusOverlay, &SpriteInstance)>,
    icons: Query<(&StatusIcon, &SpriteInstance)>,
    markers: Query<(Entity, &LabelInstance), With<DamageMarker>>,
    mut scene: ResMut<SceneState>,
) {
    for event in entity_events.read() {
        match event {
            EntityEvent::StatusEffect {
                id,
                effect,
                active,
                looping,
            } => {
                let Some(entity) = find_by_id(&targets, *id) else {
                    debug!("Status effect for unknown entity id {id}");
                    continue;
                };
                let Ok(child_entities) = children.get(entity) else {
                    continue;
                };
                for child in child_entities.iter() {
                    let Ok((overlay_entity, overlay, sprite)) = overlays.get(child) else {
                        continue;
                    };
                    if overlay.0 != *effect {
                        continue;
                    }
                    if *active {
                        scene.backend.set_visible(sprite.handle, true);
                        scene.backend.play_clip(sprite.handle, effect.clip_key(), true);
                        commands
                            .entity(overlay_entity)
                            .insert(AnimationBundle::overlay(effect.clip_key(), *looping));
                    } else {
                        scene.backend.set_visible(sprite.handle, false);
                        scene.backend.set_frame(sprite.handle, &effect.first_frame());
                        commands
                            .entity(overlay_entity)
                            .remove::<(Animation, AnimationTimer)>();
                    }
                    break;
                }
            }
            EntityEvent::StatusIcon { id, icon, active } => {
                let Some(entity) = find_by_id(&targets, *id) else {
                    debug!("Status icon for unknown entity id {id}");
                    continue;
                };
                let Ok(child_entities) = children.get(entity) else {
                    continue;
                };
                for child in child_entities.iter() {
                    if let Ok((status_icon, sprite)) = icons.get(child) {
                        if status_icon.0 == *icon {
                            scene.backend.set_visible(sprite.handle, *active);
                            break;
                        }
                    }
                }
            }
            EntityEvent::Damaged { id, amount } => {
                let Some(entity) = find_by_id(&targets, *id) else {
                    debug!("Damage for unknown entity id {id}");
                    continue;
                };
                let Ok(child_entities) = children.get(entity) else {
                    continue;
                };
                for child in child_entities.iter() {
                    if let Ok((marker_entity, label)) = markers.get(child) {
                        scene.backend.set_label_text(label.handle, &format!("-{amount}"));
                        scene.backend.set_label_visible(label.handle, true);
                        commands.entity(marker_entity).insert(DamageFlash {
                            timer: Timer::from_seconds(1.0, TimerMode::Once),
                        });
                        break;
                    }
                }
            }
            _ => {}
        }
    }
}

/// Hides expired damage markers.
pub fn expire_damage_markers(
    mut commands: Commands,
    time: Res<Time>,
    mut flashes: Query<(Entity, &mut DamageFlash, &LabelInstance)>,
    mut scene: ResMut<SceneState>,
) {
    for (entity, mut flash, label) in flashes.iter_mut() {
        flash.timer.tick(time.delta());
        if flash.timer.is_finished() {
            scene.backend.set_label_visible(label.handle, false);
            commands.entity(entity).remove::<DamageFlash>();
        }
    }
}

fn find_by_id(targets: &Query<(Entity, &EntityId)>, id: u32) -> Option<Entity> {
    targets
        .iter()
        .find(|(_, entity_id)| entity_id.id == id)
        .map(|(entity, _)| entity)
}
