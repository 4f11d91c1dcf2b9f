//! Game ECS plugin
//!
//! Registers all game systems with explicit ordering via [`GameSet`].
//! Everything that touches the scene backend is gated on [`SceneState`]
//! existing, so a headless world (no backend injected yet) stays inert
//! instead of panicking.

use bevy::prelude::*;

use super::animation;
use super::catalog::AnimationCatalog;
use super::interaction;
use super::systems::{self, GameSet};
use crate::app_state::AppState;
use crate::game_data::GameData;
use crate::SceneState;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        // Configure system set ordering
        systems::configure_game_sets(app);

        app.init_resource::<interaction::HoveredEntity>()
            .add_systems(
                Startup,
                (
                    load_default_game_data.run_if(not(resource_exists::<AnimationCatalog>)),
                    compile_catalog.run_if(resource_exists::<SceneState>),
                )
                    .chain(),
            )
            // === Event Processing Systems ===
            .add_systems(
                Update,
                (
                    crate::app_state::session_transition_system,
                    interaction::entity_hover_system.run_if(resource_exists::<SceneState>),
                    systems::expire_damage_markers.run_if(resource_exists::<SceneState>),
                )
                    .in_set(GameSet::EventProcessing),
            )
            // === Spawning Systems ===
            .add_systems(
                Update,
                (systems::spawn_entities_system, systems::dedupe_entities_by_id)
                    .chain()
                    .run_if(in_state(AppState::InGame))
                    .run_if(resource_exists::<SceneState>)
                    .in_set(GameSet::Spawning),
            )
            // === Movement Systems ===
            .add_systems(
                Update,
                (systems::entity_motion_system, systems::status_effect_system)
                    .run_if(in_state(AppState::InGame))
                    .run_if(resource_exists::<SceneState>)
                    .in_set(GameSet::Movement),
            )
            // === Physics Systems ===
            .add_systems(
                Update,
                systems::movement_tween_system
                    .run_if(in_state(AppState::InGame))
                    .in_set(GameSet::Physics),
            )
            // === Animation Systems ===
            .add_systems(
                Update,
                animation::animation_system
                    .run_if(in_state(AppState::InGame))
                    .in_set(GameSet::Animation),
            )
            // === Render Sync Systems ===
            .add_systems(
                Update,
                (
                    systems::base_animation_complete_system,
                    systems::overlay_animation_complete_system,
                    systems::sync_scene_positions,
                )
                    .chain()
                    .run_if(resource_exists::<SceneState>)
                    .in_set(GameSet::RenderSync),
            );
    }
}

/// Builds the catalog and text definitions from the built-in data set when
/// the embedder has not inserted its own.
fn load_default_game_data(mut commands: Commands) {
    let data = GameData::builtin();
    let mut catalog = AnimationCatalog::default();
    catalog.register_all(data.types);
    commands.insert_resource(catalog);
    commands.insert_resource(data.text);
}

/// Compiles every registered type into backend clips, once, at startup.
fn compile_catalog(mut catalog: ResMut<AnimationCatalog>, mut scene: ResMut<SceneState>) {
    catalog.compile(scene.backend.as_mut());
}
