pub mod recording;
pub mod scene;

pub use recording::RecordingScene;
pub use scene::{ClipDef, LabelHandle, SceneBackend, SpriteHandle, MISSING_FRAME};
