//! Trait rule evaluation.
//!
//! Each [`TraitCondition`] maps to one predicate in [`condition_holds`]; the
//! folding helpers below sum the effects of every rule whose predicate holds
//! for the holder in the given context.

use crate::config::CombatParams;
use crate::env::{Element, MoveDefinition, SwitchOutHook, TraitCondition, TraitDefinition, TraitEffect};
use crate::state::{Combatant, CombatantState, StatKind, StatusKind};

/// Facts the predicates read about the trait holder.
#[derive(Clone, Copy, Debug)]
pub struct TraitContext<'m> {
    pub hp: u32,
    pub max_hp: u32,
    /// The battle is still in its first turn.
    pub first_turn: bool,
    /// Holder's affinity after any elemental shift.
    pub element: Element,
    /// Move being used by or against the holder, when there is one.
    pub mv: Option<&'m MoveDefinition>,
}

impl<'m> TraitContext<'m> {
    pub fn of(combatant: &Combatant, state: &CombatantState, mv: Option<&'m MoveDefinition>) -> Self {
        Self {
            hp: combatant.hp,
            max_hp: combatant.max_hp,
            first_turn: !state.past_first_turn,
            element: state.element_of(combatant),
            mv,
        }
    }
}

/// The predicate table.
pub fn condition_holds(condition: TraitCondition, ctx: &TraitContext<'_>, params: &CombatParams) -> bool {
    let hp = ctx.hp as u64 * 100;
    let max = ctx.max_hp as u64;
    match condition {
        TraitCondition::Always => true,
        TraitCondition::LowHp => hp < max * params.low_hp_percent as u64,
        TraitCondition::HighHp => hp > max * params.high_hp_percent as u64,
        TraitCondition::FirstTurn => ctx.first_turn,
        TraitCondition::SameTypeMove => ctx.mv.is_some_and(|mv| mv.element == ctx.element),
        TraitCondition::PowerAtMost(limit) => ctx.mv.is_some_and(|mv| mv.power <= limit),
        TraitCondition::MoveElement(element) => ctx.mv.is_some_and(|mv| mv.element == element),
    }
}

/// Effects of every rule whose condition holds.
pub fn active_effects<'t>(
    traits: &'t [TraitDefinition],
    ctx: &'t TraitContext<'_>,
    params: &'t CombatParams,
) -> impl Iterator<Item = &'t TraitEffect> {
    traits
        .iter()
        .flat_map(|definition| definition.rules.iter())
        .filter(move |rule| condition_holds(rule.when, ctx, params))
        .map(|rule| &rule.effect)
}

pub fn stat_bonus_percent(
    traits: &[TraitDefinition],
    ctx: &TraitContext<'_>,
    params: &CombatParams,
    stat: StatKind,
) -> i32 {
    active_effects(traits, ctx, params)
        .filter_map(|effect| match *effect {
            TraitEffect::StatBonus { stat: s, percent } if s == stat => Some(percent),
            _ => None,
        })
        .sum()
}

/// Outgoing damage bonus, including knockout scaling.
pub fn damage_boost_percent(
    traits: &[TraitDefinition],
    ctx: &TraitContext<'_>,
    params: &CombatParams,
    knockouts: u32,
) -> u32 {
    active_effects(traits, ctx, params)
        .map(|effect| match *effect {
            TraitEffect::DamageBoost { percent } => percent,
            TraitEffect::KnockoutScaling {
                percent_per_ko,
                max_stacks,
            } => percent_per_ko.saturating_mul(knockouts.min(max_stacks)),
            _ => 0,
        })
        .sum()
}

/// Incoming damage reduction, capped at 100.
pub fn damage_reduction_percent(
    traits: &[TraitDefinition],
    ctx: &TraitContext<'_>,
    params: &CombatParams,
) -> u32 {
    active_effects(traits, ctx, params)
        .map(|effect| match *effect {
            TraitEffect::DamageReduction { percent } => percent,
            _ => 0,
        })
        .sum::<u32>()
        .min(100)
}

pub fn crit_chance_bp(traits: &[TraitDefinition], ctx: &TraitContext<'_>, params: &CombatParams) -> u32 {
    active_effects(traits, ctx, params)
        .map(|effect| match *effect {
            TraitEffect::CritChance { bp } => bp,
            _ => 0,
        })
        .sum()
}

pub fn crit_damage_percent(
    traits: &[TraitDefinition],
    ctx: &TraitContext<'_>,
    params: &CombatParams,
) -> u32 {
    active_effects(traits, ctx, params)
        .map(|effect| match *effect {
            TraitEffect::CritDamage { percent } => percent,
            _ => 0,
        })
        .sum()
}

pub fn accuracy_percent(traits: &[TraitDefinition], ctx: &TraitContext<'_>, params: &CombatParams) -> i32 {
    active_effects(traits, ctx, params)
        .map(|effect| match *effect {
            TraitEffect::Accuracy { percent } => percent,
            _ => 0,
        })
        .sum()
}

pub fn evasion_percent(traits: &[TraitDefinition], ctx: &TraitContext<'_>, params: &CombatParams) -> i32 {
    active_effects(traits, ctx, params)
        .map(|effect| match *effect {
            TraitEffect::Evasion { percent } => percent,
            _ => 0,
        })
        .sum()
}

pub fn recoil_reduction_percent(
    traits: &[TraitDefinition],
    ctx: &TraitContext<'_>,
    params: &CombatParams,
) -> u32 {
    active_effects(traits, ctx, params)
        .map(|effect| match *effect {
            TraitEffect::RecoilReduction { percent } => percent,
            _ => 0,
        })
        .sum::<u32>()
        .min(100)
}

pub fn is_immune_to(
    traits: &[TraitDefinition],
    ctx: &TraitContext<'_>,
    params: &CombatParams,
    status: StatusKind,
) -> bool {
    active_effects(traits, ctx, params)
        .any(|effect| matches!(*effect, TraitEffect::StatusImmunity { status: s } if s == status))
}

pub fn switch_out_hooks(
    traits: &[TraitDefinition],
    ctx: &TraitContext<'_>,
    params: &CombatParams,
) -> Vec<SwitchOutHook> {
    active_effects(traits, ctx, params)
        .filter_map(|effect| match *effect {
            TraitEffect::OnSwitchOut(hook) => Some(hook),
            _ => None,
        })
        .collect()
}
