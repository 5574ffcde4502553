//! Damage calculation.

use crate::config::CombatParams;
use crate::env::{BattleEnv, BattleRng, BossContext, Effectiveness, MoveCategory, MoveDefinition};
use crate::state::{Combatant, CombatantState, StatKind, StatusKind};

use super::Participant;
use super::stats::effective_stat;
use super::traits::{self, TraitContext};

/// Result of one damage calculation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    /// HP to remove from the defender.
    pub damage: u32,
    /// HP to restore to the defender (absorb matchups only).
    pub heal: u32,
    pub critical: bool,
    pub effectiveness: Effectiveness,
}

/// Base damage before any multiplier.
///
/// # Formula
///
/// ```text
/// damage = floor(((2·level/5 + 7) · power · atk / def) / 20 + 2)
/// ```
///
/// Computed as a single integer division, `(2·level + 35)·power·atk /
/// (100·def) + 2`, so no precision is lost on intermediate steps. Defense is
/// a divisor: a high value shrinks damage but never cancels it.
pub fn base_damage(level: u32, power: u32, attack: u32, defense: u32) -> u64 {
    let numerator = (2 * level as u64 + 35) * power as u64 * attack as u64;
    numerator / (100 * defense.max(1) as u64) + 2
}

#[inline]
fn scale(value: u64, percent: u64) -> u64 {
    value * percent / 100
}

/// Attacking and defending stats for a move category.
///
/// A burned attacker's physical attack is reduced here and only here; the
/// combatant's displayed stats are untouched.
pub fn offense_and_defense(
    params: &CombatParams,
    attacker: &Participant<'_>,
    defender: &Participant<'_>,
    category: MoveCategory,
) -> (u32, u32) {
    let (attack_stat, defense_stat) = match category {
        MoveCategory::Special => (StatKind::SpAttack, StatKind::SpDefense),
        MoveCategory::Physical | MoveCategory::Status => (StatKind::Attack, StatKind::Defense),
    };

    let mut attack = effective_stat(
        attacker.combatant,
        attacker.state,
        attacker.traits,
        params,
        attack_stat,
    );
    if category == MoveCategory::Physical && attacker.state.statuses.has(StatusKind::Burn) {
        attack = (attack as u64 * params.burn_attack_percent as u64 / 100).max(1) as u32;
    }

    let defense = effective_stat(
        defender.combatant,
        defender.state,
        defender.traits,
        params,
        defense_stat,
    );
    (attack, defense)
}

/// Full damage calculation for a move that has already hit.
///
/// # Multiplier chain
///
/// ```text
/// 1. STAB                      move element == attacker affinity
/// 2. type effectiveness        immune → 0, absorb → heal (both stop here)
/// 3. traits                    attacker boosts, defender reductions
/// 4. critical hit              chance in basis points, damage in percent
/// 5. variance                  uniform in [min, max] percent
/// 6. global provider bonus
/// 7. boss multipliers          vs. boss bonus, boss-vs-target reduction
/// 8. defender shield
/// ```
///
/// The chain runs on thousandths of a damage point. Any non-immune,
/// non-absorbed hit deals at least 1.
pub fn calculate_damage(
    env: &BattleEnv<'_>,
    params: &CombatParams,
    attacker: &Participant<'_>,
    defender: &Participant<'_>,
    mv: &MoveDefinition,
    rng: &mut BattleRng,
) -> DamageOutcome {
    let attacker_element = attacker.state.element_of(attacker.combatant);
    let defender_element = defender.state.element_of(defender.combatant);
    let effectiveness = env.effectiveness(mv.element, defender_element);

    match effectiveness {
        Effectiveness::Immune => {
            return DamageOutcome {
                effectiveness,
                ..DamageOutcome::default()
            };
        }
        Effectiveness::Absorb => {
            return DamageOutcome {
                heal: defender.combatant.percent_of_max(params.absorb_heal_percent),
                effectiveness,
                ..DamageOutcome::default()
            };
        }
        _ => {}
    }

    let (attack, defense) = offense_and_defense(params, attacker, defender, mv.category);
    let mut scaled = base_damage(attacker.combatant.level, mv.power, attack, defense) * 1000;

    // 1. STAB
    if mv.element == attacker_element {
        scaled = scale(scaled, params.stab_percent as u64);
    }

    // 2. effectiveness
    match effectiveness {
        Effectiveness::Super => scaled = scale(scaled, params.super_effective_percent as u64),
        Effectiveness::Resisted => scaled = scale(scaled, params.resisted_percent as u64),
        _ => {}
    }

    // 3. traits
    let attacker_ctx = TraitContext::of(attacker.combatant, attacker.state, Some(mv));
    let defender_ctx = TraitContext::of(defender.combatant, defender.state, Some(mv));
    let boost = traits::damage_boost_percent(
        attacker.traits,
        &attacker_ctx,
        params,
        attacker.state.knockouts,
    );
    scaled = scale(scaled, 100 + boost as u64);
    let reduction = traits::damage_reduction_percent(defender.traits, &defender_ctx, params);
    scaled = scale(scaled, 100 - reduction as u64);

    // 4. critical
    let modifiers = env.modifiers();
    let crit_bp = params.crit_base_bp
        + mv.crit_stage * params.crit_stage_bp
        + traits::crit_chance_bp(attacker.traits, &attacker_ctx, params)
        + modifiers.crit_chance_bp(attacker.combatant, attacker.side);
    let critical = rng.roll_bp(crit_bp);
    if critical {
        let crit_percent = params.crit_damage_percent
            + traits::crit_damage_percent(attacker.traits, &attacker_ctx, params)
            + modifiers.crit_damage_percent(attacker.combatant, attacker.side);
        scaled = scale(scaled, crit_percent as u64);
    }

    // 5. variance
    let variance = rng.range(params.variance_min_percent, params.variance_max_percent);
    scaled = scale(scaled, variance as u64);

    // 6. global bonuses
    scaled = scale(
        scaled,
        modifiers.global_damage_percent(attacker.combatant, attacker.side) as u64,
    );

    // 7. boss multipliers
    match (&attacker.combatant.boss, &defender.combatant.boss) {
        (None, Some(profile)) => {
            let boss = BossContext {
                tier: profile.tier,
                just_transitioned: defender.state.phase.just_transitioned,
            };
            scaled = scale(
                scaled,
                modifiers.boss_damage_percent(attacker.combatant, attacker.side, boss) as u64,
            );
        }
        (Some(profile), None) => {
            let boss = BossContext {
                tier: profile.tier,
                just_transitioned: attacker.state.phase.just_transitioned,
            };
            let reduction = modifiers
                .boss_damage_reduction_percent(defender.combatant, defender.side, boss)
                .min(100);
            scaled = scale(scaled, 100 - reduction as u64);
        }
        _ => {}
    }

    // 8. shield
    let shield = defender.state.effects.shield_percent();
    scaled = scale(scaled, 100 - shield as u64);

    let damage = (scaled / 1000).clamp(1, u32::MAX as u64) as u32;
    DamageOutcome {
        damage,
        heal: 0,
        critical,
        effectiveness,
    }
}

/// Damage a confused combatant deals to itself: a typeless physical hit of
/// the configured power using its own attack and defense.
pub fn confusion_damage(
    combatant: &Combatant,
    state: &CombatantState,
    traits: &[crate::env::TraitDefinition],
    params: &CombatParams,
) -> u32 {
    let attack = effective_stat(combatant, state, traits, params, StatKind::Attack);
    let defense = effective_stat(combatant, state, traits, params, StatKind::Defense);
    base_damage(combatant.level, params.confusion_self_hit_power, attack, defense)
        .clamp(1, u32::MAX as u64) as u32
}
