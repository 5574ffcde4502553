//! Turn orchestration.
//!
//! A [`Battle`] is an incremental turn generator. Callers either drain it
//! with [`Battle::run`] or step it one turn at a time with
//! [`Battle::next_turn`]; both go through the same resolution code, so a
//! stepped battle and a drained one with the same inputs produce the same
//! records.
//!
//! Each turn:
//!
//! 1. gather one action per participant (selector or manual decision)
//! 2. sort by priority, speed, then a drawn tie-break
//! 3. execute in order, skipping actors or targets that have fainted
//! 4. apply burn and poison damage, then tick the tracker

mod errors;
mod order;
mod record;
mod setup;
mod turn;

pub use errors::{SetupError, TurnError};
#[cfg(feature = "serde")]
pub use record::compute_record_root;
pub use record::{
    BattleOutcome, BattleReport, BattleStatus, BattleSummary, DefeatedOpponent, RecordFlags,
    RecordKind, TurnRecord, TurnReport,
};
pub use setup::BattleSetup;

use crate::config::BattleConfig;
use crate::env::{BattleEnv, BattleRng};
use crate::selector::{ActionSelector, Decision, FirstUsableMove};
use crate::state::{Combatant, CombatState, Side, Slot, Teams};

static FIRST_USABLE: FirstUsableMove = FirstUsableMove;

/// How the two sides face each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// One active combatant per side.
    #[default]
    Duel,
    /// The `lone` side's active faces every living member of the other side.
    Horde { lone: Side },
}

impl Topology {
    /// Whether `side` keeps a single active combatant that can be swapped.
    pub fn has_active(&self, side: Side) -> bool {
        match *self {
            Topology::Duel => true,
            Topology::Horde { lone } => side == lone,
        }
    }
}

/// A battle in progress.
pub struct Battle<'a> {
    env: BattleEnv<'a>,
    config: BattleConfig,
    topology: Topology,
    teams: Teams,
    state: CombatState,
    rng: BattleRng,
    manual: Option<Side>,
    selectors: [Option<&'a dyn ActionSelector>; 2],
    outcome: Option<BattleOutcome>,
    records: Vec<TurnRecord>,
    turns_resolved: u32,
}

impl<'a> Battle<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        env: BattleEnv<'a>,
        config: BattleConfig,
        topology: Topology,
        teams: Teams,
        state: CombatState,
        rng: BattleRng,
        manual: Option<Side>,
        selectors: [Option<&'a dyn ActionSelector>; 2],
    ) -> Self {
        Self {
            env,
            config,
            topology,
            teams,
            state,
            rng,
            manual,
            selectors,
            outcome: None,
            records: Vec::new(),
            turns_resolved: 0,
        }
    }

    pub fn teams(&self) -> &Teams {
        &self.teams
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Side whose decisions come from the caller, if any.
    pub fn manual_side(&self) -> Option<Side> {
        self.manual
    }

    /// Every record produced so far.
    pub fn records(&self) -> &[TurnRecord] {
        &self.records
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn status(&self) -> BattleStatus {
        match self.outcome {
            Some(outcome) => BattleStatus::Finished(outcome),
            None => BattleStatus::Ongoing,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// The active combatant of `side`. In a horde, the side without an active
    /// returns its lowest-index living member.
    pub fn active(&self, side: Side) -> Option<&Combatant> {
        if self.topology.has_active(side) {
            self.teams
                .get(Slot::new(side, self.state.active(side)))
                .filter(|c| c.is_alive())
        } else {
            self.teams.living(side).map(|(_, c)| c).next()
        }
    }

    /// Resolves one turn.
    ///
    /// `input` is the manual side's decision and must be present exactly
    /// when a side is controlled manually. Protocol errors are returned
    /// before anything is resolved or drawn.
    pub fn next_turn(&mut self, input: Option<Decision>) -> Result<TurnReport, TurnError> {
        if self.outcome.is_some() {
            return Err(TurnError::BattleFinished);
        }
        match (self.manual, input) {
            (Some(side), None) => return Err(TurnError::InputRequired { side }),
            (None, Some(_)) => return Err(TurnError::NotControlled),
            (Some(side), Some(Decision::Swap { to })) if !self.can_swap(side, to) => {
                return Err(TurnError::InvalidSwap { index: to });
            }
            _ => {}
        }

        let turn = self.state.turn();
        let records = self.resolve_turn(input);
        self.records.extend(records.iter().cloned());
        Ok(TurnReport {
            turn,
            records,
            status: self.status(),
        })
    }

    /// Drains the battle to its end. Fails with
    /// [`TurnError::InputRequired`] when a side is controlled manually.
    pub fn run(mut self) -> Result<BattleReport, TurnError> {
        while self.outcome.is_none() {
            self.next_turn(None)?;
        }
        Ok(self.into_report())
    }

    /// Summary of the battle so far. A battle abandoned before it ended
    /// reports a timeout.
    pub fn summary(&self) -> BattleSummary {
        let defeated = self
            .teams
            .side(Side::Opponent)
            .iter()
            .filter(|c| !c.is_alive())
            .map(|c| DefeatedOpponent {
                id: c.id,
                species: c.species,
                level: c.level,
                rarity: self
                    .env
                    .species(c.species)
                    .map(|species| species.rarity)
                    .unwrap_or_default(),
                element: c.element,
            })
            .collect();
        let survivors = self
            .teams
            .living(Side::Player)
            .map(|(_, c)| c.id)
            .collect();

        BattleSummary {
            outcome: self.outcome.unwrap_or(BattleOutcome::Timeout),
            turns: self.turns_resolved,
            defeated,
            survivors,
            seed: self.rng.seed(),
        }
    }

    pub fn into_report(self) -> BattleReport {
        let summary = self.summary();
        BattleReport {
            records: self.records,
            summary,
            teams: self.teams,
        }
    }

    fn selector(&self, side: Side) -> &'a dyn ActionSelector {
        self.selectors[side.index()].unwrap_or(&FIRST_USABLE)
    }

    /// A swap is valid into a living teammate other than the current active,
    /// on a side that has an active.
    fn can_swap(&self, side: Side, to: usize) -> bool {
        self.topology.has_active(side)
            && to != self.state.active(side)
            && self.teams.is_alive(Slot::new(side, to))
    }
}
