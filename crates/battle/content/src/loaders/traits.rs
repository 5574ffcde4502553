//! Trait catalog loader.

use std::path::Path;

use battle_core::TraitDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Trait catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitCatalog {
    pub traits: Vec<TraitDefinition>,
}

/// Loader for trait definitions from RON files.
pub struct TraitLoader;

impl TraitLoader {
    /// Load the trait catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing TraitCatalog
    ///
    /// # Returns
    ///
    /// Returns a Vec of TraitDefinitions.
    pub fn load(path: &Path) -> LoadResult<Vec<TraitDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<TraitDefinition>> {
        let catalog: TraitCatalog = parse_ron(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse trait catalog RON: {}", e))?;

        Ok(catalog.traits)
    }
}
