//! Damage & effects calculator.
//!
//! Pure functions over the combatants, the tracker and the oracles. The only
//! source of randomness is the [`BattleRng`](crate::env::BattleRng) passed in
//! by the caller.
//!
//! - `stats`: effective stats after bonuses, phases and stages
//! - `damage`: the damage formula and multiplier chain
//! - `hit`: accuracy and evasion
//! - `gate`: can-act checks (flinch, primary status, confusion)
//! - `effects`: move effect payloads
//! - `traits`: trait predicates and folding

pub mod damage;
pub mod effects;
pub mod gate;
pub mod hit;
pub mod stats;
pub mod traits;

pub use damage::{DamageOutcome, base_damage, calculate_damage, confusion_damage};
pub use effects::{EffectScope, apply_move_effects, stage_message};
pub use gate::{BlockReason, GateResult, check_can_act};
pub use hit::{hit_chance, roll_hit};
pub use stats::{effective_speed, effective_stat};
pub use traits::{TraitContext, condition_holds};

use crate::env::TraitDefinition;
use crate::state::{Combatant, CombatantState, Side};

/// One side of an interaction: the combatant, its tracker entry, its side and
/// its resolved traits.
#[derive(Clone, Copy, Debug)]
pub struct Participant<'c> {
    pub combatant: &'c Combatant,
    pub state: &'c CombatantState,
    pub side: Side,
    pub traits: &'c [TraitDefinition],
}

impl<'c> Participant<'c> {
    pub fn new(
        combatant: &'c Combatant,
        state: &'c CombatantState,
        side: Side,
        traits: &'c [TraitDefinition],
    ) -> Self {
        Self {
            combatant,
            state,
            side,
            traits,
        }
    }
}
