use bevy::prelude::*;
use rendering::SceneBackend;

/// The injected scene backend every render-facing system talks to. Handed
/// in by the embedder (real engine adapter, recording scene in tests);
/// never looked up from ambient state.
#[derive(Resource)]
pub struct SceneState {
    pub backend: Box<dyn SceneBackend>,
}

impl SceneState {
    pub fn new(backend: impl SceneBackend) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }
}
