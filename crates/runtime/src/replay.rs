//! Replay digests and verification.
//!
//! Two runs of the same seed and rosters must produce the same record
//! stream. A [`ReplayDigest`] commits to a stream with
//! [`compute_record_root`]; [`verify_replay`] runs an encounter once in
//! instant mode and once turn by turn and compares the two.
use battle_core::{
    BattleEnv, BattleOutcome, BattleReport, BattleSetup, TurnRecord, compute_record_root,
};
use tracing::{debug, warn};

use crate::api::{Result, RuntimeError};
use crate::session::BattleSession;

/// Commitment to a finished battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayDigest {
    pub seed: u64,
    pub root: [u8; 32],
    pub records: usize,
    pub turns: u32,
    pub outcome: BattleOutcome,
}

impl ReplayDigest {
    pub fn of(report: &BattleReport) -> Self {
        Self {
            seed: report.summary.seed,
            root: compute_record_root(&report.records),
            records: report.records.len(),
            turns: report.summary.turns,
            outcome: report.summary.outcome,
        }
    }

    pub fn root_hex(&self) -> String {
        hex::encode(self.root)
    }
}

/// Checks that `actual` replays `expected` exactly.
///
/// # Errors
///
/// [`RuntimeError::ReplayDiverged`] names the first record that differs (or
/// the length of the shorter stream). [`RuntimeError::SummaryMismatch`] is
/// returned when the streams agree but the summaries do not.
pub fn verify_reports(expected: &BattleReport, actual: &BattleReport) -> Result<ReplayDigest> {
    let want = ReplayDigest::of(expected);
    let got = ReplayDigest::of(actual);

    if want.root != got.root {
        let index = first_divergence(&expected.records, &actual.records);
        warn!(index, expected = %want.root_hex(), actual = %got.root_hex(), "replay diverged");
        return Err(RuntimeError::ReplayDiverged {
            index,
            expected: want.root_hex(),
            actual: got.root_hex(),
        });
    }
    if expected.summary != actual.summary {
        return Err(RuntimeError::SummaryMismatch);
    }

    debug!(root = %want.root_hex(), records = want.records, "replay verified");
    Ok(want)
}

/// Runs the encounter produced by `make_setup` twice, instant then paced, and
/// verifies both runs agree.
///
/// `make_setup` must build the same setup each call, seed included. Setups
/// with a manual side are rejected by the instant run.
pub fn verify_replay<'a>(
    env: BattleEnv<'a>,
    make_setup: impl Fn() -> BattleSetup<'a>,
) -> Result<ReplayDigest> {
    let instant = BattleSession::start(make_setup(), env)?.run_to_end()?;

    let mut paced = BattleSession::start(make_setup(), env)?;
    while !paced.is_finished() {
        paced.step(None)?;
    }
    let paced = paced.into_report();

    verify_reports(&instant, &paced)
}

fn first_divergence(left: &[TurnRecord], right: &[TurnRecord]) -> usize {
    left.iter()
        .zip(right)
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| left.len().min(right.len()))
}
