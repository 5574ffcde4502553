//! Deterministic combat simulation for stat-driven creature battles.
//!
//! `battle-core` owns the rules: the per-battle modifier tracker, the damage
//! and effects calculator, the turn orchestrator and the boss phase
//! controller. It performs no I/O and never logs. All randomness flows from a
//! single seeded [`env::BattleRng`] per battle, so identical seeds and rosters
//! always produce identical turn-record streams.
pub mod boss;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod selector;
pub mod state;

pub use boss::{AreaHit, BossProfile, PhaseAbility, PhaseDefinition, PhaseTransition};
pub use config::{BattleConfig, CombatParams};
#[cfg(feature = "serde")]
pub use engine::compute_record_root;
pub use engine::{
    Battle, BattleOutcome, BattleReport, BattleSetup, BattleStatus, BattleSummary,
    DefeatedOpponent, RecordFlags, RecordKind, SetupError, Topology, TurnError, TurnRecord,
    TurnReport,
};
pub use env::{
    BattleEnv, BattleRng, BossContext, DamageModifierProvider, EffectPayload, EffectTarget,
    Effectiveness, Element, FlatModifiers, MatchupRow, MoveCategory, MoveDefinition, MoveEffect,
    MoveId, MoveOracle, MoveTable, NoModifiers, Rarity, SpeciesDefinition, SpeciesId,
    SpeciesOracle, SpeciesTable, SwitchOutHook, TablesOracle, TraitCondition, TraitDefinition,
    TraitEffect, TraitId, TraitOracle, TraitRule, TraitTable, TypeChart,
};
pub use error::{ErrorSeverity, GameError};
pub use selector::{ActionSelector, Decision, FirstUsableMove, SelectionContext, usable_moves};
pub use state::{
    Combatant, CombatantId, CombatState, HeldBonus, MoveSlot, Side, Slot, StatAxis, StatKind,
    Stats, StatusKind, Teams, TemporaryEffectKind,
};
