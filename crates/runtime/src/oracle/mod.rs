//! Runtime wrapper around static battle content.
//!
//! [`OracleManager`] owns the loaded [`Catalog`], the battle configuration and
//! the injected damage modifiers, and builds [`BattleEnv`] snapshots on
//! demand. The data is immutable at runtime; per-battle state lives in
//! [`battle_core::Battle`].
use std::sync::Arc;

use battle_content::{Catalog, ContentFactory, Encounter};
use battle_core::{BattleConfig, BattleEnv, BattleSetup, FlatModifiers};

use crate::api::{Result, RuntimeError};

/// Manages all oracle implementations and provides unified access
#[derive(Clone, Debug)]
pub struct OracleManager {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) modifiers: Arc<FlatModifiers>,
    pub(crate) config: BattleConfig,
}

impl OracleManager {
    /// Creates a new oracle manager with neutral modifiers.
    pub fn new(catalog: Arc<Catalog>, config: BattleConfig) -> Self {
        Self {
            catalog,
            modifiers: Arc::new(FlatModifiers::default()),
            config,
        }
    }

    /// Loads catalog and configuration from a data directory.
    pub fn from_factory(factory: &ContentFactory) -> Result<Self> {
        let catalog = factory.load_catalog().map_err(content_error)?;
        let config = factory.load_config().map_err(content_error)?;
        tracing::debug!(
            data_dir = %factory.data_dir().display(),
            moves = catalog.moves.len(),
            species = catalog.species.len(),
            "content loaded"
        );
        Ok(Self::new(Arc::new(catalog), config))
    }

    /// Oracle manager over the content compiled into `battle-content`.
    pub fn builtin() -> Result<Self> {
        let catalog = ContentFactory::builtin_catalog().map_err(content_error)?;
        let config = ContentFactory::builtin_config().map_err(content_error)?;
        Ok(Self::new(Arc::new(catalog), config))
    }

    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_modifiers(mut self, modifiers: FlatModifiers) -> Self {
        self.modifiers = Arc::new(modifiers);
        self
    }

    /// Converts the oracle manager into a BattleEnv for battle-core.
    pub fn as_battle_env(&self) -> BattleEnv<'_> {
        self.catalog.env().with_modifiers(self.modifiers.as_ref())
    }

    /// Setup for `encounter` using this manager's configuration.
    pub fn setup<'a>(&self, encounter: Encounter) -> BattleSetup<'a> {
        encounter.into_setup(self.config.clone())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }
}

fn content_error(err: impl std::fmt::Display) -> RuntimeError {
    RuntimeError::Content(format!("{err:#}"))
}
