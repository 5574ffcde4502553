//! Species catalog loader.

use std::path::Path;

use battle_core::SpeciesDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Species catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesCatalog {
    pub species: Vec<SpeciesDefinition>,
}

/// Loader for species definitions from RON files.
pub struct SpeciesLoader;

impl SpeciesLoader {
    /// Load the species catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing SpeciesCatalog
    ///
    /// # Returns
    ///
    /// Returns a Vec of SpeciesDefinitions.
    pub fn load(path: &Path) -> LoadResult<Vec<SpeciesDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SpeciesDefinition>> {
        let catalog: SpeciesCatalog = parse_ron(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse species catalog RON: {}", e))?;

        Ok(catalog.species)
    }
}
