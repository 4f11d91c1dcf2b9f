//! Text definitions for name labels and other world text.

use std::collections::HashMap;

use bevy::prelude::*;
use tracing::warn;

/// Placeholder shown when a text key has no definition. Deliberately
/// visible so missing entries surface in playtesting instead of crashing.
pub const MISSING_TEXT: &str = "???";

#[derive(Resource, Default)]
pub struct TextDefs {
    defs: HashMap<String, String>,
}

impl TextDefs {
    pub fn from_json(input: &str) -> anyhow::Result<Self> {
        let defs: HashMap<String, String> = serde_json::from_str(input)?;
        Ok(Self { defs })
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Resolves a text key. Never fails; a missing key logs and returns the
    /// placeholder.
    pub fn get(&self, key: &str) -> String {
        match self.defs.get(key) {
            Some(text) => text.clone(),
            None => {
                warn!("Missing text definition for key {key:?}");
                MISSING_TEXT.to_string()
            }
        }
    }
}
