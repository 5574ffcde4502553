//! Hit chance and accuracy rolls.

use crate::config::CombatParams;
use crate::env::{BattleRng, MoveDefinition};
use crate::state::StatAxis;

use super::Participant;
use super::traits::{self, TraitContext};

/// Hit chance in percent, clamped to `[0, 100]`.
///
/// # Formula
///
/// ```text
/// chance = accuracy × acc_mult(attacker) / eva_mult(defender)
///        + attacker accuracy traits − defender evasion traits
/// ```
///
/// A move with accuracy 100 or more ignores every modifier and always hits.
pub fn hit_chance(
    params: &CombatParams,
    attacker: &Participant<'_>,
    defender: &Participant<'_>,
    mv: &MoveDefinition,
) -> u32 {
    if mv.never_misses() {
        return 100;
    }

    let accuracy_stage = attacker.state.stages.get(StatAxis::Accuracy);
    let evasion_stage = defender.state.stages.get(StatAxis::Evasion);
    let accuracy_mult = StatAxis::Accuracy.multiplier_permille(accuracy_stage) as i64;
    let evasion_mult = StatAxis::Evasion.multiplier_permille(evasion_stage) as i64;

    let attacker_ctx = TraitContext::of(attacker.combatant, attacker.state, Some(mv));
    let defender_ctx = TraitContext::of(defender.combatant, defender.state, Some(mv));

    let base = mv.accuracy as i64 * accuracy_mult / evasion_mult;
    let adjusted = base + traits::accuracy_percent(attacker.traits, &attacker_ctx, params) as i64
        - traits::evasion_percent(defender.traits, &defender_ctx, params) as i64;
    adjusted.clamp(0, 100) as u32
}

/// Rolls whether `mv` connects. Never-miss moves consume no draw.
pub fn roll_hit(
    params: &CombatParams,
    attacker: &Participant<'_>,
    defender: &Participant<'_>,
    mv: &MoveDefinition,
    rng: &mut BattleRng,
) -> bool {
    rng.roll_percent(hit_chance(params, attacker, defender, mv))
}
