//! Data-driven battle content and loaders.
//!
//! This crate houses static battle content and provides loaders for RON/TOML
//! data files:
//! - Move definitions (data-driven via RON)
//! - Trait definitions (data-driven via RON)
//! - Species definitions (data-driven via RON)
//! - Elemental type chart (data-driven via RON)
//! - Encounter rosters (data-driven via RON)
//! - Battle configuration (data-driven via TOML)
//!
//! Content is consumed through battle-core's oracle traits and never appears
//! in per-battle state.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::Catalog;

#[cfg(feature = "loaders")]
pub use loaders::{
    CombatantSpec, ConfigLoader, ContentFactory, Encounter, MoveLoader, MoveSlotSpec,
    RosterLoader, RosterSpec, SpeciesLoader, TraitLoader, TypeChartLoader, TypeChartSpec,
};
