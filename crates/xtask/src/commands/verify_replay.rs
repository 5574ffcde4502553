//! Verify that a roster replays identically.

use anyhow::Result;
use battle_core::Side;
use clap::Parser;
use console::style;
use runtime::{SelectorKind, verify_replay};

use crate::utils::ContentArgs;

/// Run a roster in instant and paced mode and compare record roots
#[derive(Parser)]
pub struct VerifyReplay {
    /// Roster file path, or a roster name under `<data-dir>/rosters/`
    #[arg(value_name = "ROSTER")]
    roster: String,

    #[command(flatten)]
    content: ContentArgs,

    /// Seed override
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u64>,

    /// Strategy for both sides
    #[arg(long, value_name = "AI", default_value = "greedy")]
    ai: SelectorKind,

    /// Number of consecutive seeds to check, starting at the chosen seed
    #[arg(short, long, default_value_t = 1)]
    runs: u64,
}

impl VerifyReplay {
    pub fn execute(self) -> Result<()> {
        let oracles = self.content.oracles()?;
        let encounter = self.content.encounter(&self.roster, &oracles)?;
        let selector = self.ai.selector();
        let base_seed = self
            .seed
            .or(encounter.seed)
            .unwrap_or_else(|| oracles.setup(encounter.clone()).seed());

        for offset in 0..self.runs.max(1) {
            let seed = base_seed.wrapping_add(offset);
            let digest = verify_replay(oracles.as_battle_env(), || {
                oracles
                    .setup(encounter.clone())
                    .with_seed(seed)
                    .with_selector(Side::Player, selector)
                    .with_selector(Side::Opponent, selector)
            })?;

            println!(
                "{} seed {} · {} records · {} turns · {} · {}",
                style("✓").green().bold(),
                digest.seed,
                digest.records,
                digest.turns,
                digest.outcome,
                style(digest.root_hex()).dim()
            );
        }

        Ok(())
    }
}
