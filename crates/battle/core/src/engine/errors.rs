//! Error types for battle setup and turn stepping.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{CombatantId, Side};

/// Rejections raised while validating rosters at battle start.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("{side} roster is empty")]
    EmptyTeam { side: Side },

    #[error("{side} roster has {size} combatants (max {max})")]
    TeamTooLarge { side: Side, size: usize, max: usize },

    #[error("{side} roster has no living combatants")]
    NoLivingMembers { side: Side },

    #[error("combatant id {id} appears more than once")]
    DuplicateId { id: CombatantId },

    #[error("combatant {id} has hp {hp} outside 1..={max_hp}")]
    InvalidHp { id: CombatantId, hp: u32, max_hp: u32 },

    #[error("combatant {id} has level 0")]
    InvalidLevel { id: CombatantId },

    #[error("boss {id} phase thresholds must be within 1..=99 and strictly descending")]
    InvalidPhaseThresholds { id: CombatantId },

    #[error("the {side} side fields a horde and cannot be controlled manually")]
    ManualHordeSide { side: Side },
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use SetupError::*;
        match self {
            EmptyTeam { .. } => "SETUP_EMPTY_TEAM",
            TeamTooLarge { .. } => "SETUP_TEAM_TOO_LARGE",
            NoLivingMembers { .. } => "SETUP_NO_LIVING_MEMBERS",
            DuplicateId { .. } => "SETUP_DUPLICATE_ID",
            InvalidHp { .. } => "SETUP_INVALID_HP",
            InvalidLevel { .. } => "SETUP_INVALID_LEVEL",
            InvalidPhaseThresholds { .. } => "SETUP_INVALID_PHASE_THRESHOLDS",
            ManualHordeSide { .. } => "SETUP_MANUAL_HORDE_SIDE",
        }
    }
}

/// Misuse of the incremental stepping protocol.
///
/// Returned before anything about the turn is resolved, so the battle can be
/// stepped again with corrected input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("the battle has already ended")]
    BattleFinished,

    #[error("the {side} side is controlled manually and needs a decision")]
    InputRequired { side: Side },

    #[error("a decision was submitted but no side is controlled manually")]
    NotControlled,

    #[error("cannot swap to roster index {index}")]
    InvalidSwap { index: usize },
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        use TurnError::*;
        match self {
            BattleFinished => ErrorSeverity::Fatal,
            InputRequired { .. } | InvalidSwap { .. } => ErrorSeverity::Recoverable,
            NotControlled => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use TurnError::*;
        match self {
            BattleFinished => "TURN_BATTLE_FINISHED",
            InputRequired { .. } => "TURN_INPUT_REQUIRED",
            NotControlled => "TURN_NOT_CONTROLLED",
            InvalidSwap { .. } => "TURN_INVALID_SWAP",
        }
    }
}
