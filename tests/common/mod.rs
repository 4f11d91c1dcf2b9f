use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rendering::{LabelHandle, RecordingScene, SpriteHandle};

use duskhollow::ecs::components::{
    DamageMarker, DirectionalState, EffectKind, EntityId, LabelInstance, NameLabel,
    SpriteInstance, StatusOverlay,
};
use duskhollow::events::{EntityEvent, SpawnEntity};
use duskhollow::SceneState;

/// Headless app harness: the full core plugin stack against a recording
/// scene, with manually advanced time.
pub struct TestScene {
    app: App,
    next_entity_id: u32,
}

impl TestScene {
    pub fn new() -> Self {
        let mut app = App::new();
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
        app.add_plugins(MinimalPlugins)
            .add_plugins(duskhollow::CorePlugin);
        app.insert_resource(SceneState::new(RecordingScene::new()));

        // Virtual time clamps each step to `max_delta` (250 ms by default),
        // which would truncate the single large manual steps the tests drive
        // through `advance_time`. Lift the clamp so one step delivers its
        // full requested duration.
        app.world_mut()
            .resource_mut::<Time<Virtual>>()
            .set_max_delta(Duration::from_secs(3600));

        app.finish();
        app.cleanup();

        // Run one update so startup compiles the catalog
        app.update();

        Self {
            app,
            next_entity_id: 1,
        }
    }

    pub fn app(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn update(&mut self) {
        self.app.update();
    }

    pub fn advance_time(&mut self, duration: Duration) {
        self.app
            .insert_resource(TimeUpdateStrategy::ManualDuration(duration));
        self.app.update();
        self.app
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    pub fn send(&mut self, event: EntityEvent) {
        let mut entity_events = self.app.world_mut().resource_mut::<Messages<EntityEvent>>();
        entity_events.write(event);
    }

    /// Spawns an entity of `kind` facing `direction` and runs one update.
    pub fn spawn_entity(&mut self, kind: &str, direction: &str) -> u32 {
        let id = self.next_entity_id();
        self.send(EntityEvent::Spawn(SpawnEntity {
            id,
            kind: kind.to_string(),
            x: 4.0,
            y: 4.0,
            direction: direction.to_string(),
            display_name_color: None,
        }));
        self.update();
        id
    }

    pub fn scene(&self) -> &RecordingScene {
        self.app
            .world()
            .resource::<SceneState>()
            .backend
            .as_any()
            .downcast_ref::<RecordingScene>()
            .expect("test backend is a RecordingScene")
    }

    pub fn scene_mut(&mut self) -> &mut RecordingScene {
        self.app
            .world_mut()
            .resource_mut::<SceneState>()
            .into_inner()
            .backend
            .as_any_mut()
            .downcast_mut::<RecordingScene>()
            .expect("test backend is a RecordingScene")
    }

    pub fn entity(&mut self, id: u32) -> Option<Entity> {
        let mut query = self.app.world_mut().query::<(Entity, &EntityId)>();
        query
            .iter(self.app.world())
            .find(|(_, entity_id)| entity_id.id == id)
            .map(|(entity, _)| entity)
    }

    pub fn entity_count(&mut self, id: u32) -> usize {
        let mut query = self.app.world_mut().query::<&EntityId>();
        query
            .iter(self.app.world())
            .filter(|entity_id| entity_id.id == id)
            .count()
    }

    pub fn base_sprite(&mut self, id: u32) -> SpriteHandle {
        let entity = self.entity(id).expect("entity exists");
        self.app
            .world()
            .get::<SpriteInstance>(entity)
            .expect("entity has a base sprite")
            .handle
    }

    pub fn directional(&mut self, id: u32) -> DirectionalState {
        let entity = self.entity(id).expect("entity exists");
        self.app
            .world()
            .get::<DirectionalState>(entity)
            .expect("entity has directional state")
            .clone()
    }

    pub fn overlay_sprite(&mut self, id: u32, effect: EffectKind) -> SpriteHandle {
        let parent = self.entity(id).expect("entity exists");
        let mut query = self
            .app
            .world_mut()
            .query::<(&ChildOf, &StatusOverlay, &SpriteInstance)>();
        query
            .iter(self.app.world())
            .find(|(child_of, overlay, _)| child_of.parent() == parent && overlay.0 == effect)
            .map(|(_, _, sprite)| sprite.handle)
            .expect("entity has the overlay")
    }

    pub fn name_label(&mut self, id: u32) -> Option<LabelHandle> {
        let parent = self.entity(id)?;
        let mut query = self
            .app
            .world_mut()
            .query_filtered::<(&ChildOf, &LabelInstance), With<NameLabel>>();
        query
            .iter(self.app.world())
            .find(|(child_of, _)| child_of.parent() == parent)
            .map(|(_, label)| label.handle)
    }

    pub fn damage_marker_label(&mut self, id: u32) -> Option<LabelHandle> {
        let parent = self.entity(id)?;
        let mut query = self
            .app
            .world_mut()
            .query_filtered::<(&ChildOf, &LabelInstance), With<DamageMarker>>();
        query
            .iter(self.app.world())
            .find(|(child_of, _)| child_of.parent() == parent)
            .map(|(_, label)| label.handle)
    }
}
