//! Deterministic in-memory scene used by the demo binary and the test
//! suites. Tracks full sprite/label/clip state and keeps an ordered command
//! log so callers can assert on exactly what the core asked the engine to do.

use glam::Vec2;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::warn;

use crate::scene::{ClipDef, LabelHandle, SceneBackend, SpriteHandle};

#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    CreateSprite { sprite: SpriteHandle, atlas: String, frame: String },
    CreateClip { key: String },
    PlayClip { sprite: SpriteHandle, key: String },
    StopClip { sprite: SpriteHandle },
    SetFrame { sprite: SpriteHandle, frame: String },
    SetVisible { sprite: SpriteHandle, visible: bool },
    SetScale { sprite: SpriteHandle, scale: f32 },
    DestroySprite { sprite: SpriteHandle },
    CreateLabel { label: LabelHandle, text: String },
    SetLabelVisible { label: LabelHandle, visible: bool },
    DestroyLabel { label: LabelHandle },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteState {
    pub atlas: String,
    /// Last explicitly pinned frame. Stale while a clip is playing.
    pub frame: String,
    /// Key of the clip currently playing, if any.
    pub playing: Option<String>,
    pub visible: bool,
    pub scale: f32,
    pub origin: Vec2,
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelState {
    pub text: String,
    pub color: Option<String>,
    pub visible: bool,
    pub position: Vec2,
}

#[derive(Default)]
pub struct RecordingScene {
    next_id: u64,
    clips: FxHashMap<String, ClipDef>,
    sprites: FxHashMap<u64, SpriteState>,
    labels: FxHashMap<u64, LabelState>,
    /// Frames declared absent from the atlas, for missing-asset tests.
    absent_frames: FxHashSet<String>,
    log: Vec<SceneCommand>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a frame as missing so `has_frame` reports it absent.
    pub fn declare_frame_absent(&mut self, frame: impl Into<String>) {
        self.absent_frames.insert(frame.into());
    }

    pub fn sprite(&self, handle: SpriteHandle) -> Option<&SpriteState> {
        self.sprites.get(&handle.0)
    }

    pub fn label(&self, handle: LabelHandle) -> Option<&LabelState> {
        self.labels.get(&handle.0)
    }

    pub fn clip(&self, key: &str) -> Option<&ClipDef> {
        self.clips.get(key)
    }

    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Key of the clip currently playing on `handle`, if any.
    pub fn playing(&self, handle: SpriteHandle) -> Option<&str> {
        self.sprites
            .get(&handle.0)
            .and_then(|s| s.playing.as_deref())
    }

    pub fn commands(&self) -> &[SceneCommand] {
        &self.log
    }

    /// Drains the command log, leaving state intact.
    pub fn take_commands(&mut self) -> Vec<SceneCommand> {
        std::mem::take(&mut self.log)
    }

    fn alloc(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn sprite_mut(&mut self, handle: SpriteHandle, op: &str) -> Option<&mut SpriteState> {
        let state = self.sprites.get_mut(&handle.0);
        if state.is_none() {
            warn!("{op} on dead sprite handle {handle:?}");
        }
        state
    }
}

impl SceneBackend for RecordingScene {
    fn create_sprite(&mut self, atlas: &str, frame: &str) -> SpriteHandle {
        let handle = SpriteHandle(self.alloc());
        self.sprites.insert(
            handle.0,
            SpriteState {
                atlas: atlas.to_string(),
                frame: frame.to_string(),
                playing: None,
                visible: true,
                scale: 1.0,
                origin: Vec2::ZERO,
                position: Vec2::ZERO,
            },
        );
        self.log.push(SceneCommand::CreateSprite {
            sprite: handle,
            atlas: atlas.to_string(),
            frame: frame.to_string(),
        });
        handle
    }

    fn create_clip(&mut self, def: ClipDef) {
        self.log.push(SceneCommand::CreateClip {
            key: def.key.clone(),
        });
        self.clips.insert(def.key.clone(), def);
    }

    fn play_clip(&mut self, sprite: SpriteHandle, key: &str, restart_if_same: bool) {
        if !self.clips.contains_key(key) {
            warn!("play_clip for unregistered clip {key:?}");
            return;
        }
        let Some(state) = self.sprite_mut(sprite, "play_clip") else {
            return;
        };
        if !restart_if_same && state.playing.as_deref() == Some(key) {
            return;
        }
        state.playing = Some(key.to_string());
        self.log.push(SceneCommand::PlayClip {
            sprite,
            key: key.to_string(),
        });
    }

    fn stop_clip(&mut self, sprite: SpriteHandle) {
        if let Some(state) = self.sprite_mut(sprite, "stop_clip") {
            state.playing = None;
            self.log.push(SceneCommand::StopClip { sprite });
        }
    }

    fn set_frame(&mut self, sprite: SpriteHandle, frame: &str) {
        if let Some(state) = self.sprite_mut(sprite, "set_frame") {
            state.playing = None;
            state.frame = frame.to_string();
            self.log.push(SceneCommand::SetFrame {
                sprite,
                frame: frame.to_string(),
            });
        }
    }

    fn set_visible(&mut self, sprite: SpriteHandle, visible: bool) {
        if let Some(state) = self.sprite_mut(sprite, "set_visible") {
            state.visible = visible;
            self.log.push(SceneCommand::SetVisible { sprite, visible });
        }
    }

    fn set_scale(&mut self, sprite: SpriteHandle, scale: f32) {
        if let Some(state) = self.sprite_mut(sprite, "set_scale") {
            state.scale = scale;
            self.log.push(SceneCommand::SetScale { sprite, scale });
        }
    }

    fn set_origin(&mut self, sprite: SpriteHandle, origin: Vec2) {
        if let Some(state) = self.sprite_mut(sprite, "set_origin") {
            state.origin = origin;
        }
    }

    fn set_position(&mut self, sprite: SpriteHandle, position: Vec2) {
        // Position churn is deliberately kept out of the command log.
        if let Some(state) = self.sprite_mut(sprite, "set_position") {
            state.position = position;
        }
    }

    fn destroy_sprite(&mut self, sprite: SpriteHandle) {
        if self.sprites.remove(&sprite.0).is_some() {
            self.log.push(SceneCommand::DestroySprite { sprite });
        } else {
            warn!("destroy_sprite on dead sprite handle {sprite:?}");
        }
    }

    fn create_label(&mut self, text: &str, color: Option<&str>) -> LabelHandle {
        let handle = LabelHandle(self.alloc());
        self.labels.insert(
            handle.0,
            LabelState {
                text: text.to_string(),
                color: color.map(str::to_string),
                visible: true,
                position: Vec2::ZERO,
            },
        );
        self.log.push(SceneCommand::CreateLabel {
            label: handle,
            text: text.to_string(),
        });
        handle
    }

    fn set_label_text(&mut self, label: LabelHandle, text: &str) {
        if let Some(state) = self.labels.get_mut(&label.0) {
            state.text = text.to_string();
        } else {
            warn!("set_label_text on dead label handle {label:?}");
        }
    }

    fn set_label_visible(&mut self, label: LabelHandle, visible: bool) {
        if let Some(state) = self.labels.get_mut(&label.0) {
            state.visible = visible;
            self.log.push(SceneCommand::SetLabelVisible { label, visible });
        } else {
            warn!("set_label_visible on dead label handle {label:?}");
        }
    }

    fn set_label_position(&mut self, label: LabelHandle, position: Vec2) {
        if let Some(state) = self.labels.get_mut(&label.0) {
            state.position = position;
        }
    }

    fn destroy_label(&mut self, label: LabelHandle) {
        if self.labels.remove(&label.0).is_some() {
            self.log.push(SceneCommand::DestroyLabel { label });
        } else {
            warn!("destroy_label on dead label handle {label:?}");
        }
    }

    fn has_frame(&self, _atlas: &str, frame: &str) -> bool {
        !self.absent_frames.contains(frame)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
