//! Effective stat computation.
//!
//! # Formula
//!
//! ```text
//! bonus     = 100 + held% + trait%          (floored at 0)
//! effective = base × bonus/100 × phase%/100 × stage_permille/1000
//! ```
//!
//! Speed is additionally cut by paralysis. The result is never below 1. The
//! burn penalty is not part of the effective stat; it applies only inside the
//! damage formula for physical moves.

use crate::config::CombatParams;
use crate::env::TraitDefinition;
use crate::state::{Combatant, CombatantState, StatAxis, StatKind, StatusKind};

use super::traits::{TraitContext, stat_bonus_percent};

/// Phase multiplier percent for a stat. Attack-side phases scale both
/// offensive stats, defense-side phases both defensive stats.
fn phase_percent(state: &CombatantState, stat: StatKind) -> u32 {
    match stat {
        StatKind::Attack | StatKind::SpAttack => state.phase.attack_percent,
        StatKind::Defense | StatKind::SpDefense => state.phase.defense_percent,
        StatKind::Speed => state.phase.speed_percent,
    }
}

pub fn effective_stat(
    combatant: &Combatant,
    state: &CombatantState,
    traits: &[TraitDefinition],
    params: &CombatParams,
    stat: StatKind,
) -> u32 {
    let ctx = TraitContext::of(combatant, state, None);
    let bonus = (100 + combatant.held_percent(stat) + stat_bonus_percent(traits, &ctx, params, stat))
        .max(0) as u64;
    let phase = phase_percent(state, stat) as u64;
    let stage = StatAxis::from(stat).multiplier_permille(state.stages.get(stat.into())) as u64;

    let mut value = (combatant.stats.get(stat) as u64)
        .saturating_mul(bonus)
        .saturating_mul(phase)
        .saturating_mul(stage)
        / 10_000_000;
    if stat == StatKind::Speed && state.statuses.has(StatusKind::Paralyze) {
        value = value * params.paralysis_speed_percent as u64 / 100;
    }
    value.clamp(1, u32::MAX as u64) as u32
}

/// Speed used to order actions.
pub fn effective_speed(
    combatant: &Combatant,
    state: &CombatantState,
    traits: &[TraitDefinition],
    params: &CombatParams,
) -> u32 {
    effective_stat(combatant, state, traits, params, StatKind::Speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Element, SpeciesId, TraitCondition, TraitEffect, TraitId, TraitRule};
    use crate::state::{CombatantId, Stats};

    fn combatant() -> Combatant {
        Combatant::new(
            CombatantId(1),
            "c",
            SpeciesId(1),
            50,
            100,
            Stats::new(100, 80, 60, 40, 90),
            Element::Normal,
        )
    }

    #[test]
    fn neutral_state_keeps_base_stat() {
        let c = combatant();
        let state = CombatantState::default();
        let params = CombatParams::default();
        assert_eq!(effective_stat(&c, &state, &[], &params, StatKind::Attack), 100);
        assert_eq!(effective_speed(&c, &state, &[], &params), 90);
    }

    #[test]
    fn stages_held_and_trait_bonuses_stack() {
        let c = combatant().with_held_bonus(StatKind::Attack, 10);
        let mut state = CombatantState::default();
        state.stages.modify(StatAxis::Attack, 1);
        let traits = vec![TraitDefinition::new(TraitId(1), "Brawn").with_rule(TraitRule::always(
            TraitEffect::StatBonus {
                stat: StatKind::Attack,
                percent: 10,
            },
        ))];
        let params = CombatParams::default();
        // 100 × 120% × 1.5
        assert_eq!(effective_stat(&c, &state, &traits, &params, StatKind::Attack), 180);
    }

    #[test]
    fn paralysis_halves_speed() {
        let c = combatant();
        let mut state = CombatantState::default();
        state.statuses.add(StatusKind::Paralyze, 5);
        let params = CombatParams::default();
        assert_eq!(effective_speed(&c, &state, &[], &params), 45);
    }

    #[test]
    fn phase_percent_compounds_onto_stat() {
        let c = combatant();
        let mut state = CombatantState::default();
        state.phase.attack_percent = 130;
        let params = CombatParams::default();
        assert_eq!(effective_stat(&c, &state, &[], &params, StatKind::Attack), 130);
        assert_eq!(effective_stat(&c, &state, &[], &params, StatKind::SpAttack), 78);
    }

    #[test]
    fn stat_never_drops_below_one() {
        let c = combatant();
        let state = CombatantState::default();
        let traits = vec![TraitDefinition::new(TraitId(2), "Frail").with_rule(TraitRule::when(
            TraitCondition::Always,
            TraitEffect::StatBonus {
                stat: StatKind::Defense,
                percent: -200,
            },
        ))];
        let params = CombatParams::default();
        assert_eq!(effective_stat(&c, &state, &traits, &params, StatKind::Defense), 1);
    }
}
