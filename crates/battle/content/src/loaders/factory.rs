//! Content factory for building catalogs from data files.

use std::path::{Path, PathBuf};

use battle_core::BattleConfig;

use crate::Catalog;
use crate::loaders::{
    ConfigLoader, Encounter, LoadResult, MoveLoader, RosterLoader, SpeciesLoader, TraitLoader,
    TypeChartLoader,
};

const BUILTIN_CONFIG: &str = include_str!("../../data/config.toml");
const BUILTIN_MOVES: &str = include_str!("../../data/moves.ron");
const BUILTIN_TRAITS: &str = include_str!("../../data/traits.ron");
const BUILTIN_SPECIES: &str = include_str!("../../data/species.ron");
const BUILTIN_TYPE_CHART: &str = include_str!("../../data/type_chart.ron");

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── moves.ron
/// ├── traits.ron
/// ├── species.ron
/// ├── type_chart.ron
/// └── rosters/
///     ├── skirmish.ron
///     └── warden.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the move catalog from `moves.ron`.
    pub fn load_moves(&self) -> LoadResult<Vec<battle_core::MoveDefinition>> {
        let path = self.data_dir.join("moves.ron");
        MoveLoader::load(&path)
    }

    /// Load trait definitions from `traits.ron`.
    pub fn load_traits(&self) -> LoadResult<Vec<battle_core::TraitDefinition>> {
        let path = self.data_dir.join("traits.ron");
        TraitLoader::load(&path)
    }

    /// Load species definitions from `species.ron`.
    pub fn load_species(&self) -> LoadResult<Vec<battle_core::SpeciesDefinition>> {
        let path = self.data_dir.join("species.ron");
        SpeciesLoader::load(&path)
    }

    /// Load the type chart from `type_chart.ron`.
    pub fn load_type_chart(&self) -> LoadResult<battle_core::TypeChart> {
        let path = self.data_dir.join("type_chart.ron");
        TypeChartLoader::load(&path)
    }

    /// Load every static table into one [`Catalog`].
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        Ok(Catalog::new(
            self.load_moves()?,
            self.load_traits()?,
            self.load_species()?,
            self.load_type_chart()?,
        ))
    }

    /// Load an encounter from `rosters/{roster_name}.ron`.
    ///
    /// # Arguments
    ///
    /// * `roster_name` - Name of the roster file (without `.ron` extension)
    /// * `catalog` - Catalog the roster's names resolve against
    pub fn load_roster(&self, roster_name: &str, catalog: &Catalog) -> LoadResult<Encounter> {
        let path = self
            .data_dir
            .join("rosters")
            .join(format!("{}.ron", roster_name));
        RosterLoader::load(&path, catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Configuration compiled into the crate.
    pub fn builtin_config() -> LoadResult<BattleConfig> {
        ConfigLoader::parse(BUILTIN_CONFIG)
    }

    /// Catalog compiled into the crate, usable without a data directory.
    pub fn builtin_catalog() -> LoadResult<Catalog> {
        Ok(Catalog::new(
            MoveLoader::parse(BUILTIN_MOVES)?,
            TraitLoader::parse(BUILTIN_TRAITS)?,
            SpeciesLoader::parse(BUILTIN_SPECIES)?,
            TypeChartLoader::parse(BUILTIN_TYPE_CHART)?,
        ))
    }
}
