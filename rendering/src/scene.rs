//! Scene graph boundary consumed by the client core.
//!
//! The real engine (GPU scene, texture atlases, text rendering) lives behind
//! [`SceneBackend`]. The core only hands out atlas frame names and clip keys;
//! how they map onto textures is the backend's business.

use glam::Vec2;

/// Frame name reserved for assets the atlas cannot resolve. Backends must
/// always be able to display it.
pub const MISSING_FRAME: &str = "missing-frame";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelHandle(pub u64);

/// A compiled animation clip, registered globally once.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipDef {
    pub key: String,
    pub frames: Vec<String>,
    /// Total duration for one pass over `frames`, in milliseconds.
    pub duration_ms: u64,
    pub looping: bool,
}

impl ClipDef {
    /// Per-frame duration in seconds.
    pub fn frame_duration(&self) -> f32 {
        let frames = self.frames.len().max(1);
        self.duration_ms as f32 / 1000.0 / frames as f32
    }
}

/// Engine surface the presentation core drives.
///
/// All calls are synchronous and infallible from the caller's perspective;
/// a backend that cannot honor a request (unknown frame, dead handle) is
/// expected to degrade and log rather than fail.
pub trait SceneBackend: Send + Sync + 'static {
    /// Creates a sprite showing `frame` from `atlas`. Visible by default.
    fn create_sprite(&mut self, atlas: &str, frame: &str) -> SpriteHandle;

    /// Registers a clip under `def.key`. Re-registering a key replaces it.
    fn create_clip(&mut self, def: ClipDef);

    /// Starts `key` on the sprite. When `restart_if_same` is false and the
    /// sprite is already playing `key`, the call leaves playback untouched.
    fn play_clip(&mut self, sprite: SpriteHandle, key: &str, restart_if_same: bool);

    /// Halts clip playback, freezing the sprite on whatever frame it shows.
    fn stop_clip(&mut self, sprite: SpriteHandle);

    /// Stops any clip and pins the sprite to a single frame.
    fn set_frame(&mut self, sprite: SpriteHandle, frame: &str);

    fn set_visible(&mut self, sprite: SpriteHandle, visible: bool);
    fn set_scale(&mut self, sprite: SpriteHandle, scale: f32);
    fn set_origin(&mut self, sprite: SpriteHandle, origin: Vec2);
    fn set_position(&mut self, sprite: SpriteHandle, position: Vec2);
    fn destroy_sprite(&mut self, sprite: SpriteHandle);

    /// Creates a text label. `color` is a CSS-style fill ("#ff6b00") or
    /// None for the default fill.
    fn create_label(&mut self, text: &str, color: Option<&str>) -> LabelHandle;
    fn set_label_text(&mut self, label: LabelHandle, text: &str);
    fn set_label_visible(&mut self, label: LabelHandle, visible: bool);
    fn set_label_position(&mut self, label: LabelHandle, position: Vec2);
    fn destroy_label(&mut self, label: LabelHandle);

    /// Whether `frame` exists in `atlas`. Callers substitute
    /// [`MISSING_FRAME`] when this returns false.
    fn has_frame(&self, atlas: &str, frame: &str) -> bool;

    /// Concrete-type escape hatch for harnesses that need to inspect the
    /// backend they injected.
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
