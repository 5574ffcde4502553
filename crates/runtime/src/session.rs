//! Host-side battle driver.
//!
//! [`BattleSession`] wraps a [`Battle`] with tracing instrumentation. It
//! supports both driving modes the simulator offers: instant resolution with
//! [`BattleSession::run_to_end`], and paced stepping with
//! [`BattleSession::step`] where the caller controls when each turn resolves.
//! Both go through the same resolution code and yield the same records.
use battle_core::{
    Battle, BattleEnv, BattleOutcome, BattleReport, BattleSetup, BattleStatus, Decision,
    GameError, RecordFlags, RecordKind, TurnRecord, TurnReport,
};
use tracing::{Span, debug, info, info_span, warn};

use crate::api::Result;

/// A battle in progress together with its tracing span.
pub struct BattleSession<'a> {
    battle: Battle<'a>,
    span: Span,
}

impl<'a> BattleSession<'a> {
    /// Validates `setup` and starts the battle.
    pub fn start(setup: BattleSetup<'a>, env: BattleEnv<'a>) -> Result<Self> {
        let battle = setup.start(env).inspect_err(|err| {
            warn!(
                error = %err,
                code = err.error_code(),
                severity = err.severity().as_str(),
                "battle setup rejected"
            );
        })?;

        let span = info_span!(
            "battle",
            seed = battle.seed(),
            topology = ?battle.topology()
        );
        span.in_scope(|| {
            info!(
                player = battle.teams().side(battle_core::Side::Player).len(),
                opponent = battle.teams().side(battle_core::Side::Opponent).len(),
                manual = ?battle.manual_side(),
                "battle started"
            );
        });

        Ok(Self { battle, span })
    }

    pub fn battle(&self) -> &Battle<'a> {
        &self.battle
    }

    pub fn is_finished(&self) -> bool {
        self.battle.is_finished()
    }

    /// Resolves one turn. `input` is the manual side's decision, if any.
    pub fn step(&mut self, input: Option<Decision>) -> Result<TurnReport> {
        let _guard = self.span.enter();

        let report = self.battle.next_turn(input).inspect_err(|err| {
            warn!(
                error = %err,
                code = err.error_code(),
                severity = err.severity().as_str(),
                "turn rejected"
            );
        })?;

        for record in &report.records {
            trace_record(record);
        }
        debug!(
            turn = report.turn,
            records = report.records.len(),
            "turn resolved"
        );
        if let BattleStatus::Finished(outcome) = report.status {
            self.log_end(outcome);
        }
        Ok(report)
    }

    /// Instant mode: resolves every remaining turn with AI decisions only.
    pub fn run_to_end(mut self) -> Result<BattleReport> {
        while !self.battle.is_finished() {
            self.step(None)?;
        }
        Ok(self.battle.into_report())
    }

    /// Drives the battle to its end, asking `decide` for the manual side's
    /// decision before each turn. Sessions without a manual side never call
    /// it.
    pub fn run_with(
        mut self,
        mut decide: impl FnMut(&Battle<'a>) -> Decision,
    ) -> Result<BattleReport> {
        while !self.battle.is_finished() {
            let input = self.battle.manual_side().map(|_| decide(&self.battle));
            self.step(input)?;
        }
        Ok(self.battle.into_report())
    }

    /// Ends the session, reporting the battle as it stands.
    pub fn into_report(self) -> BattleReport {
        self.battle.into_report()
    }

    fn log_end(&self, outcome: BattleOutcome) {
        let summary = self.battle.summary();
        match outcome {
            BattleOutcome::Timeout => warn!(
                turns = summary.turns,
                turn_cap = self.battle.config().turn_cap,
                "battle hit the turn cap"
            ),
            _ => info!(
                ?outcome,
                turns = summary.turns,
                defeated = summary.defeated.len(),
                survivors = summary.survivors.len(),
                "battle finished"
            ),
        }
    }
}

fn trace_record(record: &TurnRecord) {
    debug!(
        turn = record.turn,
        kind = ?record.kind,
        actor = %record.actor,
        target = ?record.target,
        damage = record.damage,
        flags = ?record.flags,
        "{}",
        record.messages.join(" ")
    );

    if record.has(RecordFlags::FALLBACK) {
        warn!(actor = %record.actor, "fallback move substituted");
    }
    if record.kind == RecordKind::Phase
        && let Some(phase) = &record.phase
    {
        info!(
            boss = %record.actor,
            phase = phase.phase,
            threshold = phase.threshold_percent,
            ability = %phase.ability,
            "boss phase transition"
        );
        if let Some(species) = phase.summon {
            info!(boss = %record.actor, ?species, "boss calls for a minion");
        }
    }
    if record.has(RecordFlags::KNOCKOUT)
        && let Some(target) = record.target
    {
        info!(actor = %record.actor, %target, "knockout");
    }
}

/// A fresh seed from the host's entropy source.
///
/// Seeds are the only input that needs real randomness; everything inside a
/// battle derives from them.
pub fn random_seed() -> u64 {
    rand::random()
}
