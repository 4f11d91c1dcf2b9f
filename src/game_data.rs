//! Declarative game data: the entity type registry and text definitions.
//!
//! The built-in data set ships embedded in the binary; a data directory on
//! disk can override it (modding, server-pushed registries).

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::{error, info};

use crate::ecs::catalog::EntityTypeDescriptor;
use crate::text::TextDefs;

const BUILTIN_TYPES: &str = include_str!("../data/entity-types.toml");
const BUILTIN_TEXT: &str = include_str!("../data/text-defs.json");

#[derive(Debug, Deserialize)]
struct TypeRegistryFile {
    types: Vec<EntityTypeDescriptor>,
}

pub struct GameData {
    pub types: Vec<EntityTypeDescriptor>,
    pub text: TextDefs,
}

impl GameData {
    /// The data set compiled into the binary. A parse failure here is a
    /// build defect; it degrades to an empty registry rather than aborting
    /// the client.
    pub fn builtin() -> Self {
        let types = match toml::from_str::<TypeRegistryFile>(BUILTIN_TYPES) {
            Ok(file) => file.types,
            Err(e) => {
                error!("Failed to parse built-in entity type registry: {e}");
                Vec::new()
            }
        };
        let text = match TextDefs::from_json(BUILTIN_TEXT) {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to parse built-in text definitions: {e}");
                TextDefs::default()
            }
        };
        info!("Loaded built-in game data ({} entity types)", types.len());
        Self { types, text }
    }

    /// Loads `entity-types.toml` and `text-defs.json` from a directory.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let types_path = dir.join("entity-types.toml");
        let content = fs::read_to_string(&types_path)
            .with_context(|| format!("reading {types_path:?}"))?;
        let registry: TypeRegistryFile = toml::from_str(&content)
            .with_context(|| format!("parsing {types_path:?}"))?;

        let text_path = dir.join("text-defs.json");
        let content = fs::read_to_string(&text_path)
            .with_context(|| format!("reading {text_path:?}"))?;
        let text = TextDefs::from_json(&content)
            .with_context(|| format!("parsing {text_path:?}"))?;

        info!(
            "Loaded game data from {dir:?} ({} entity types)",
            registry.types.len()
        );
        Ok(Self {
            types: registry.types,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_data_parses() {
        let data = GameData::builtin();
        assert!(data.types.iter().any(|t| t.name == "mage"));
        assert!(!data.text.is_empty());
    }

    #[test]
    fn builtin_mage_matches_its_declaration() {
        let data = GameData::builtin();
        let mage = data.types.iter().find(|t| t.name == "mage").unwrap();
        assert_eq!(mage.animation_set.as_deref(), Some("mage"));
        assert!(!mage.repeats);
        assert_eq!(mage.scale, 1.2);
    }
}
