//! Entity hover handling
//!
//! The input adapter publishes [`EntityHoverEvent`]s; these systems are the
//! hover-enter/hover-exit hooks that reveal and hide name labels.

use bevy::prelude::*;

use super::components::{LabelInstance, NameLabel};
use crate::events::EntityHoverEvent;
use crate::SceneState;

/// Resource tracking which entity is currently hovered by the pointer
#[derive(Resource, Default)]
pub struct HoveredEntity(pub Option<Entity>);

pub fn entity_hover_system(
    mut hover_events: MessageReader<EntityHoverEvent>,
    mut hovered: ResMut<HoveredEntity>,
    children: Query<&Children>,
    labels: Query<&LabelInstance, With<NameLabel>>,
    mut scene: ResMut<SceneState>,
) {
    for event in hover_events.read() {
        if event.entity == hovered.0 {
            continue;
        }

        // A despawned entity simply fails the lookups; hover state still
        // moves on.
        if let Some(previous) = hovered.0 {
            set_name_label_visible(previous, false, &children, &labels, &mut scene);
        }
        if let Some(entity) = event.entity {
            set_name_label_visible(entity, true, &children, &labels, &mut scene);
        }
        hovered.0 = event.entity;
    }
}

fn set_name_label_visible(
    entity: Entity,
    visible: bool,
    children: &Query<&Children>,
    labels: &Query<&LabelInstance, With<NameLabel>>,
    scene: &mut SceneState,
) {
    let Ok(child_entities) = children.get(entity) else {
        return;
    };
    for child in child_entities.iter() {
        if let Ok(label) = labels.get(child) {
            scene.backend.set_label_visible(label.handle, visible);
            return;
        }
    }
}
