//! Data-driven animation registry.
//!
//! Entity types are declarative records; the catalog expands each type's
//! compact frame-index sequence into four direction-qualified clips on the
//! scene backend, once at startup. New creature/projectile types are added
//! as data entries, not code.

use std::collections::HashMap;

use bevy::prelude::*;
use rendering::{ClipDef, SceneBackend, MISSING_FRAME};
use serde::Deserialize;
use tracing::{debug, warn};

use super::components::{Direction, EffectKind};

/// Texture atlas every entity sprite and overlay frame lives in.
pub const GAME_ATLAS: &str = "game-atlas";

/// The canonical walk cadence: step, pass, step, other pass.
const DEFAULT_FRAME_SEQUENCE: [u8; 4] = [1, 2, 1, 3];
const DEFAULT_DURATION_MS: u64 = 500;

fn default_frame_sequence() -> Vec<u8> {
    DEFAULT_FRAME_SEQUENCE.to_vec()
}

fn default_duration_ms() -> u64 {
    DEFAULT_DURATION_MS
}

fn default_scale() -> f32 {
    1.0
}

/// One entity type as declared in `data/entity-types.toml`. Immutable after
/// registration and shared by every instance of the type.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityTypeDescriptor {
    pub name: String,
    /// Base name of the per-direction clip set; types without one (static
    /// props, simple projectiles) render their `base_frame` only.
    #[serde(default)]
    pub animation_set: Option<String>,
    #[serde(default = "default_frame_sequence")]
    pub frame_sequence: Vec<u8>,
    /// Whether the moving clip loops until stopped; one-shot sets play a
    /// single pass per step.
    #[serde(default)]
    pub repeats: bool,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Static frame for types with no animation set.
    #[serde(default)]
    pub base_frame: Option<String>,
    #[serde(default)]
    pub display_name_key: Option<String>,
    #[serde(default)]
    pub name_color: Option<String>,
}

/// One compiled per-direction clip.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSet {
    pub key: String,
    pub frames: Vec<String>,
    pub duration_ms: u64,
    pub looping: bool,
}

#[derive(Resource, Default)]
pub struct AnimationCatalog {
    types: HashMap<String, EntityTypeDescriptor>,
    /// Clip key ("mage-up") -> compiled set.
    sets: HashMap<String, AnimationSet>,
    compiled: bool,
}

impl AnimationCatalog {
    /// Registers a type. Idempotent per name; a repeated registration keeps
    /// the first descriptor.
    pub fn register_type(&mut self, descriptor: EntityTypeDescriptor) {
        if self.types.contains_key(&descriptor.name) {
            debug!("Entity type {:?} already registered, keeping first", descriptor.name);
            return;
        }
        self.types.insert(descriptor.name.clone(), descriptor);
    }

    pub fn register_all(&mut self, descriptors: impl IntoIterator<Item = EntityTypeDescriptor>) {
        for descriptor in descriptors {
            self.register_type(descriptor);
        }
    }

    pub fn get_type(&self, name: &str) -> Option<&EntityTypeDescriptor> {
        self.types.get(name)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    /// Generates one clip per direction for every type that declares an
    /// animation set, plus the shared status-effect clips. Run once after
    /// all types are registered.
    pub fn compile(&mut self, scene: &mut dyn SceneBackend) {
        if self.compiled {
            warn!("Animation catalog already compiled, skipping");
            return;
        }

        for descriptor in self.types.values() {
            let Some(set_name) = &descriptor.animation_set else {
                continue;
            };
            if descriptor.frame_sequence.is_empty() {
                warn!(
                    "Entity type {:?} declares animation set {set_name:?} with an empty \
                     frame sequence, falling back to its placeholder frame",
                    descriptor.name
                );
                continue;
            }

            for direction in Direction::ALL {
                let key = format!("{set_name}-{}", direction.suffix());
                let frames: Vec<String> = descriptor
                    .frame_sequence
                    .iter()
                    .map(|n| format!("{set_name}-{}-{n}", direction.suffix()))
                    .collect();
                let set = AnimationSet {
                    key: key.clone(),
                    frames: frames.clone(),
                    duration_ms: descriptor.duration_ms,
                    looping: descriptor.repeats,
                };
                scene.create_clip(ClipDef {
                    key: key.clone(),
                    frames,
                    duration_ms: descriptor.duration_ms,
                    looping: descriptor.repeats,
                });
                self.sets.insert(key, set);
            }
        }

        register_effect_clips(scene);
        self.compiled = true;
    }

    /// Compiled clip for a type facing `direction`, if the type has one.
    pub fn animation_set(&self, type_name: &str, direction: Direction) -> Option<&AnimationSet> {
        let descriptor = self.types.get(type_name)?;
        let set_name = descriptor.animation_set.as_ref()?;
        if !self.compiled {
            warn!(
                "Animation catalog queried for {type_name:?} before compile() ran"
            );
            return None;
        }
        self.sets
            .get(&format!("{set_name}-{}", direction.suffix()))
    }

    /// The single resting frame for an idle entity: the first frame of the
    /// direction's clip, falling back to the down-facing clip, the type's
    /// static base frame, and finally the missing-asset placeholder.
    pub fn base_frame(&self, type_name: &str, direction: Direction) -> String {
        let Some(descriptor) = self.types.get(type_name) else {
            warn!("Base frame requested for unregistered entity type {type_name:?}");
            return MISSING_FRAME.to_string();
        };

        if descriptor.animation_set.is_some() {
            if let Some(frame) = self
                .animation_set(type_name, direction)
                .or_else(|| self.animation_set(type_name, Direction::Down))
                .and_then(|set| set.frames.first())
            {
                return frame.clone();
            }
        }

        if let Some(frame) = &descriptor.base_frame {
            return frame.clone();
        }

        MISSING_FRAME.to_string()
    }
}

/// Registers the five status-overlay clips: two alternating frames each,
/// half a second per frame.
fn register_effect_clips(scene: &mut dyn SceneBackend) {
    for effect in EffectKind::ALL {
        let key = effect.clip_key();
        scene.create_clip(ClipDef {
            key: key.to_string(),
            frames: vec![format!("{key}-effect-1"), format!("{key}-effect-2")],
            duration_ms: 1000,
            looping: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rendering::RecordingScene;

    fn mage() -> EntityTypeDescriptor {
        EntityTypeDescriptor {
            name: "mage".to_string(),
            animation_set: Some("mage".to_string()),
            frame_sequence: vec![1, 2, 1, 3],
            repeats: false,
            duration_ms: 500,
            scale: 1.2,
            base_frame: None,
            display_name_key: Some("Mob name: Arch mage".to_string()),
            name_color: Some("#ff6b00".to_string()),
        }
    }

    fn compiled_catalog() -> (AnimationCatalog, RecordingScene) {
        let mut catalog = AnimationCatalog::default();
        catalog.register_type(mage());
        let mut scene = RecordingScene::new();
        catalog.compile(&mut scene);
        (catalog, scene)
    }

    #[test]
    fn compile_generates_four_sets_per_animated_type() {
        let (catalog, scene) = compiled_catalog();
        let mut keys: Vec<String> = Direction::ALL
            .iter()
            .filter_map(|d| catalog.animation_set("mage", *d).map(|s| s.key.clone()))
            .collect();
        keys.sort();
        insta::assert_debug_snapshot!(keys, @r#"
        [
            "mage-down",
            "mage-left",
            "mage-right",
            "mage-up",
        ]
        "#);
        for direction in Direction::ALL {
            let set = catalog.animation_set("mage", direction).unwrap();
            assert!(!set.frames.is_empty());
            assert!(scene.clip(&set.key).is_some());
        }
    }

    #[test]
    fn frame_sequence_expands_with_the_bounce_pattern() {
        let (catalog, _) = compiled_catalog();
        let set = catalog.animation_set("mage", Direction::Up).unwrap();
        assert_eq!(
            set.frames,
            vec!["mage-up-1", "mage-up-2", "mage-up-1", "mage-up-3"]
        );
    }

    #[test]
    fn registration_is_idempotent() {
        let mut catalog = AnimationCatalog::default();
        catalog.register_type(mage());
        let mut other = mage();
        other.scale = 9.0;
        catalog.register_type(other);
        assert_eq!(catalog.type_count(), 1);
        assert_eq!(catalog.get_type("mage").unwrap().scale, 1.2);
    }

    #[test]
    fn base_frame_falls_back_to_down_then_placeholder() {
        let (catalog, _) = compiled_catalog();
        assert_eq!(catalog.base_frame("mage", Direction::Left), "mage-left-1");

        // Unregistered type degrades to the placeholder.
        assert_eq!(catalog.base_frame("ghost", Direction::Up), MISSING_FRAME);
    }

    #[test]
    fn empty_frame_sequence_degrades_to_placeholder() {
        let mut catalog = AnimationCatalog::default();
        let mut broken = mage();
        broken.name = "broken".to_string();
        broken.frame_sequence = vec![];
        catalog.register_type(broken);
        let mut scene = RecordingScene::new();
        catalog.compile(&mut scene);

        assert!(catalog.animation_set("broken", Direction::Up).is_none());
        assert_eq!(catalog.base_frame("broken", Direction::Up), MISSING_FRAME);
    }

    #[test]
    fn uncompiled_catalog_serves_placeholder_frames() {
        let mut catalog = AnimationCatalog::default();
        catalog.register_type(mage());
        assert_eq!(catalog.base_frame("mage", Direction::Up), MISSING_FRAME);
    }

    #[test]
    fn static_types_use_their_base_frame() {
        let mut catalog = AnimationCatalog::default();
        catalog.register_type(EntityTypeDescriptor {
            name: "gravestone".to_string(),
            animation_set: None,
            frame_sequence: default_frame_sequence(),
            repeats: false,
            duration_ms: DEFAULT_DURATION_MS,
            scale: 1.0,
            base_frame: Some("gravestone".to_string()),
            display_name_key: None,
            name_color: None,
        });
        let mut scene = RecordingScene::new();
        catalog.compile(&mut scene);
        assert_eq!(catalog.base_frame("gravestone", Direction::Up), "gravestone");
        assert!(catalog.animation_set("gravestone", Direction::Up).is_none());
    }
}
