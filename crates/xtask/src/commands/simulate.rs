//! Run one battle and print its turn records.

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_core::{BattleReport, RecordFlags, RecordKind, Side, TurnRecord};
use clap::Parser;
use console::style;
use runtime::{BattleSession, ReplayDigest, SelectorKind, random_seed};

use crate::utils::ContentArgs;

/// Run a battle from a roster file
#[derive(Parser)]
pub struct Simulate {
    /// Roster file path, or a roster name under `<data-dir>/rosters/`
    #[arg(value_name = "ROSTER")]
    roster: String,

    #[command(flatten)]
    content: ContentArgs,

    /// Seed override (defaults to the roster's seed, then one derived from the rosters)
    #[arg(short, long, value_name = "SEED", conflicts_with = "random_seed")]
    seed: Option<u64>,

    /// Draw a fresh seed from the host's entropy source
    #[arg(long)]
    random_seed: bool,

    /// Strategy for the player side
    #[arg(long, value_name = "AI", default_value = "greedy")]
    player_ai: SelectorKind,

    /// Strategy for the opponent side
    #[arg(long, value_name = "AI", default_value = "greedy")]
    opponent_ai: SelectorKind,

    /// Override the configured turn cap
    #[arg(long, value_name = "TURNS")]
    turn_cap: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "log")]
    format: OutputFormat,

    /// Also write the full report as JSON to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per turn record, then the summary
    Log,
    /// Summary only
    Summary,
    /// Full JSON report on stdout
    Json,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let mut oracles = self.content.oracles()?;
        if let Some(turn_cap) = self.turn_cap {
            let config = oracles.config().clone().with_turn_cap(turn_cap);
            oracles = oracles.with_config(config);
        }
        let encounter = self.content.encounter(&self.roster, &oracles)?;

        let mut setup = oracles
            .setup(encounter)
            .with_selector(Side::Player, self.player_ai.selector())
            .with_selector(Side::Opponent, self.opponent_ai.selector());
        if self.random_seed {
            setup = setup.with_seed(random_seed());
        } else if let Some(seed) = self.seed {
            setup = setup.with_seed(seed);
        }

        let report = BattleSession::start(setup, oracles.as_battle_env())?.run_to_end()?;

        match self.format {
            OutputFormat::Log => {
                print_records(&report);
                println!();
                print_summary(&report);
            }
            OutputFormat::Summary => print_summary(&report),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }

        if let Some(path) = &self.output {
            let json = serde_json::to_string_pretty(&report)?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            println!(
                "{} {}",
                style("Report written to").dim(),
                path.display()
            );
        }

        Ok(())
    }
}

fn print_records(report: &BattleReport) {
    let mut turn = 0;
    for record in &report.records {
        if record.turn != turn {
            turn = record.turn;
            println!("{}", style(format!("── Turn {} ──", turn)).bold().cyan());
        }
        println!("  {}", describe(record));
    }
}

fn describe(record: &TurnRecord) -> String {
    let tag = match record.kind {
        RecordKind::Move => style("move").green(),
        RecordKind::Swap => style("swap").blue(),
        RecordKind::Upkeep => style("upkeep").yellow(),
        RecordKind::Phase => style("phase").magenta().bold(),
        RecordKind::Replacement => style("enter").blue(),
    };

    let mut line = format!("[{}] {}", tag, record.actor);
    if let Some(name) = &record.move_name {
        line.push_str(&format!(" {}", name));
    }
    if let Some(target) = record.target {
        line.push_str(&format!(" -> {}", target));
    }
    if record.damage > 0 {
        line.push_str(&format!(" for {}", record.damage));
    }
    if let Some(hp) = record.target_hp {
        line.push_str(&format!(" (hp {})", hp));
    }
    for (flag, label) in [
        (RecordFlags::CRITICAL, "crit"),
        (RecordFlags::SUPER_EFFECTIVE, "super"),
        (RecordFlags::RESISTED, "resisted"),
        (RecordFlags::MISS, "miss"),
        (RecordFlags::IMMUNE, "immune"),
        (RecordFlags::ABSORBED, "absorbed"),
        (RecordFlags::GUARDED, "guarded"),
        (RecordFlags::BLOCKED, "blocked"),
        (RecordFlags::FALLBACK, "fallback"),
        (RecordFlags::KNOCKOUT, "KO"),
    ] {
        if record.has(flag) {
            line.push_str(&format!(" {}", style(label).dim()));
        }
    }
    if !record.messages.is_empty() {
        line.push_str(&format!(" · {}", record.messages.join(" ")));
    }
    line
}

fn print_summary(report: &BattleReport) {
    let summary = &report.summary;
    let digest = ReplayDigest::of(report);

    println!("{}", style("=== Battle Summary ===").bold().green());
    println!("  Outcome:   {}", style(summary.outcome).bold());
    println!("  Turns:     {}", summary.turns);
    println!("  Seed:      {}", summary.seed);
    println!("  Records:   {}", digest.records);
    println!("  Root:      {}", digest.root_hex());
    println!(
        "  Survivors: {}",
        summary
            .survivors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    for defeated in &summary.defeated {
        println!(
            "  Defeated:  {} (level {}, {}, {})",
            defeated.id, defeated.level, defeated.rarity, defeated.element
        );
    }
}
