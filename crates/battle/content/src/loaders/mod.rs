//! Content loaders for reading battle data from files.
//!
//! Each loader parses one RON or TOML document into the in-memory tables
//! battle-core consumes. Loaders expose both a `load(path)` entry point and a
//! `parse(text)` one so embedded defaults go through the same code.

pub mod config;
pub mod factory;
pub mod moves;
pub mod roster;
pub mod species;
pub mod tables;
pub mod traits;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use moves::MoveLoader;
pub use roster::{CombatantSpec, Encounter, MoveSlotSpec, RosterLoader, RosterSpec};
pub use species::SpeciesLoader;
pub use tables::{TypeChartLoader, TypeChartSpec};
pub use traits::TraitLoader;

use std::path::Path;

use ron::extensions::Extensions;
use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Parses a RON document with id newtypes written as bare numbers and
/// `Some` optional.
pub(crate) fn parse_ron<T: DeserializeOwned>(
    content: &str,
) -> Result<T, ron::error::SpannedError> {
    ron::Options::default()
        .with_default_extension(Extensions::UNWRAP_NEWTYPES | Extensions::IMPLICIT_SOME)
        .from_str(content)
}

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
