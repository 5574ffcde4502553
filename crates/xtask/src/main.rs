//! Development tasks for the battle simulator
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{ListContent, Simulate, VerifyReplay};

/// Development tasks for the battle simulator
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the battle simulator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a battle from a roster file and print its records
    Simulate(Simulate),

    /// Run a roster twice (instant and paced) and compare record roots
    VerifyReplay(VerifyReplay),

    /// List the moves, traits and species available to rosters
    ListContent(ListContent),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for BATTLE_DATA_DIR and BATTLE_CONFIG)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays clean for reports
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::VerifyReplay(cmd) => cmd.execute(),
        Command::ListContent(cmd) => cmd.execute(),
    }
}
