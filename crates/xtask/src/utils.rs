//! Utility functions for xtask commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use battle_content::{ConfigLoader, ContentFactory, Encounter, RosterLoader};
use clap::Args;
use runtime::OracleManager;

/// Environment variable naming the content data directory.
pub const DATA_DIR_ENV: &str = "BATTLE_DATA_DIR";
/// Environment variable naming a battle configuration TOML file.
pub const CONFIG_ENV: &str = "BATTLE_CONFIG";

/// Content location flags shared by every command.
#[derive(Args, Clone, Debug)]
pub struct ContentArgs {
    /// Content data directory (defaults to $BATTLE_DATA_DIR, then the built-in content)
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Battle configuration TOML (defaults to $BATTLE_CONFIG, then the data directory's config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ContentArgs {
    /// Data directory from the flag, then the environment.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
    }

    fn config_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    /// Builds the oracle manager, applying any configuration override.
    pub fn oracles(&self) -> Result<OracleManager> {
        let oracles = match self.data_dir() {
            Some(dir) => {
                tracing::debug!(data_dir = %dir.display(), "loading content");
                OracleManager::from_factory(&ContentFactory::new(dir))?
            }
            None => OracleManager::builtin()?,
        };

        match self.config_path() {
            Some(path) => {
                let config = ConfigLoader::load(&path)?;
                Ok(oracles.with_config(config))
            }
            None => Ok(oracles),
        }
    }

    /// Resolves a roster argument: an existing `.ron` path, or a roster name
    /// under the data directory's `rosters/`.
    pub fn encounter(&self, roster: &str, oracles: &OracleManager) -> Result<Encounter> {
        let path = Path::new(roster);
        if path.is_file() {
            return RosterLoader::load(path, oracles.catalog());
        }

        let dir = self.data_dir().with_context(|| {
            format!(
                "Roster '{}' is not a file and no data directory is set (use --data-dir or {})",
                roster, DATA_DIR_ENV
            )
        })?;
        ContentFactory::new(dir).load_roster(roster, oracles.catalog())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_environment() {
        let args = ContentArgs {
            data_dir: Some(PathBuf::from("/tmp/battle-data")),
            config: None,
        };
        assert_eq!(args.data_dir(), Some(PathBuf::from("/tmp/battle-data")));
    }

    #[test]
    fn roster_path_is_loaded_directly() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("duel.ron");
        std::fs::write(
            &path,
            r#"(
                player: [(id: 1, species: "Cinderpup", level: 5, max_hp: 20,
                    stats: (attack: 5, defense: 5, sp_attack: 5, sp_defense: 5, speed: 5),
                    moves: [(name: "Ember")])],
                opponent: [(id: 2, species: "Rivulet", level: 5, max_hp: 20,
                    stats: (attack: 5, defense: 5, sp_attack: 5, sp_defense: 5, speed: 4),
                    moves: [(name: "Bubble Jet")])],
            )"#,
        )
        .unwrap();

        let args = ContentArgs {
            data_dir: None,
            config: None,
        };
        let oracles = OracleManager::builtin().unwrap();
        let encounter = args
            .encounter(path.to_str().unwrap(), &oracles)
            .unwrap();
        assert_eq!(encounter.player.len(), 1);
        assert_eq!(encounter.opponent[0].name, "Rivulet");
    }
}
