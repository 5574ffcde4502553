//! List the content rosters can refer to.

use anyhow::Result;
use clap::Parser;
use console::style;

use crate::utils::ContentArgs;

/// List moves, traits and species
#[derive(Parser)]
pub struct ListContent {
    #[command(flatten)]
    content: ContentArgs,
}

impl ListContent {
    pub fn execute(self) -> Result<()> {
        let oracles = self.content.oracles()?;
        let catalog = oracles.catalog();

        println!("{}", style("Moves:").bold().yellow());
        for mv in catalog.moves.iter() {
            println!(
                "  {:>3}  {:<16} {:<8} {:<8} pow {:>3}  acc {:>3}  uses {:>2}  prio {:>2}",
                mv.id.0,
                mv.name,
                mv.element,
                mv.category,
                mv.power,
                mv.accuracy,
                mv.max_uses,
                mv.priority
            );
        }
        println!();

        println!("{}", style("Traits:").bold().yellow());
        for definition in catalog.traits.iter() {
            println!(
                "  {:>3}  {:<16} {} rule(s)",
                definition.id.0,
                definition.name,
                definition.rules.len()
            );
        }
        println!();

        println!("{}", style("Species:").bold().yellow());
        for species in catalog.species.iter() {
            println!(
                "  {:>3}  {:<16} {:<8} {}",
                species.id.0, species.name, species.affinity, species.rarity
            );
        }
        println!();

        let config = oracles.config();
        println!("{}", style("Config:").bold().yellow());
        println!("  turn cap: {}", config.turn_cap);
        println!("  max team size: {}", config.max_team_size);

        Ok(())
    }
}
