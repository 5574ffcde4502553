//! Move effect application.
//!
//! Each effect rolls its own proc chance, then lands on the user or the
//! opponent. Recoil and drain always affect the user and are derived from the
//! damage the same action actually dealt.

use crate::config::CombatParams;
use crate::env::{BattleEnv, BattleRng, EffectPayload, EffectTarget, MoveDefinition, MoveEffect};
use crate::state::{CombatState, Slot, StatAxis, TemporaryEffectKind, Teams};

use super::traits::{self, TraitContext};

/// Who used the move, who it hit and how much damage it dealt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectScope {
    pub user: Slot,
    pub target: Slot,
    pub damage_dealt: u32,
}

/// Applies every effect of `mv` in declaration order, appending a message
/// for each visible outcome.
#[allow(clippy::too_many_arguments)]
pub fn apply_move_effects(
    env: &BattleEnv<'_>,
    params: &CombatParams,
    mv: &MoveDefinition,
    scope: EffectScope,
    teams: &mut Teams,
    state: &mut CombatState,
    rng: &mut BattleRng,
    messages: &mut Vec<String>,
) {
    for effect in &mv.effects {
        if !rng.roll_percent(effect.chance) {
            continue;
        }
        apply_effect(env, params, effect, scope, teams, state, rng, messages);
    }
}

#[allow(clippy::too_many_arguments)]
fn apply_effect(
    env: &BattleEnv<'_>,
    params: &CombatParams,
    effect: &MoveEffect,
    scope: EffectScope,
    teams: &mut Teams,
    state: &mut CombatState,
    rng: &mut BattleRng,
    messages: &mut Vec<String>,
) {
    let slot = match effect.payload {
        EffectPayload::Recoil { .. } | EffectPayload::Drain { .. } => scope.user,
        _ => match effect.target {
            EffectTarget::User => scope.user,
            EffectTarget::Opponent => scope.target,
        },
    };
    let Some(target) = teams.get_mut(slot) else {
        return;
    };
    if !target.is_alive() {
        return;
    }
    let id = target.id;
    let name = target.name.clone();

    match effect.payload {
        EffectPayload::InflictStatus { status, turns } => {
            let resolved = env.traits_of(target);
            let ctx = TraitContext::of(target, state.get(id), None);
            if traits::is_immune_to(&resolved, &ctx, params, status) {
                messages.push(format!("{name} is unaffected!"));
                return;
            }
            let turns = turns.unwrap_or(params.default_status_turns);
            if state.add_status(id, status, turns) {
                messages.push(format!("{name} {}!", status.inflicted_phrase()));
            }
        }
        EffectPayload::StatStage { axis, stages } => {
            let applied = state.modify_stat_stage(id, axis, stages);
            messages.push(stage_message(&name, axis, stages, applied));
        }
        EffectPayload::Heal { percent } => {
            let amount = target.percent_of_max(percent);
            let gained = target.heal(amount);
            if gained > 0 {
                messages.push(format!("{name} restored {gained} HP."));
            }
        }
        EffectPayload::FullHeal => {
            let gained = target.heal(target.max_hp);
            if gained > 0 {
                messages.push(format!("{name} was fully restored."));
            }
        }
        EffectPayload::Recoil { percent } => {
            if scope.damage_dealt == 0 || percent == 0 {
                return;
            }
            let resolved = env.traits_of(target);
            let ctx = TraitContext::of(target, state.get(id), None);
            let reduction = traits::recoil_reduction_percent(&resolved, &ctx, params) as u64;
            let raw = (scope.damage_dealt as u64 * percent as u64 / 100).max(1);
            let recoil = (raw * (100 - reduction) / 100) as u32;
            if recoil > 0 {
                target.take_damage(recoil);
                messages.push(format!("{name} is hit with recoil! (-{recoil})"));
            }
        }
        EffectPayload::Drain { percent } => {
            if scope.damage_dealt == 0 || percent == 0 {
                return;
            }
            let amount = ((scope.damage_dealt as u64 * percent as u64 / 100) as u32).max(1);
            let gained = target.heal(amount);
            if gained > 0 {
                messages.push(format!("{name} drained {gained} HP."));
            }
        }
        EffectPayload::Shield { percent, turns } => {
            state.add_effect(id, TemporaryEffectKind::Shield { percent }, turns);
            messages.push(format!("{name} is protected by a shield."));
        }
        EffectPayload::Flinch => {
            state.add_effect(id, TemporaryEffectKind::Flinch, 1);
        }
        EffectPayload::Guard => {
            let entry = state.get_mut(id);
            let fail = params.guard_fail_percent(entry.consecutive_guards);
            if rng.roll_percent(fail) {
                messages.push(format!("{name} tried to guard, but it failed!"));
            } else {
                entry.effects.add(TemporaryEffectKind::Guard, 1);
                entry.consecutive_guards += 1;
                messages.push(format!("{name} braced itself!"));
            }
        }
        EffectPayload::Cleanse => {
            let cleared = state.get_mut(id).statuses.clear();
            if !cleared.is_empty() {
                messages.push(format!("{name}'s status was cleansed."));
            }
        }
    }
}

/// Message for a stage change, including the "won't go any further" case.
pub fn stage_message(name: &str, axis: StatAxis, requested: i32, applied: i32) -> String {
    let label = axis.label();
    match applied {
        0 if requested >= 0 => format!("{name}'s {label} won't go any higher!"),
        0 => format!("{name}'s {label} won't go any lower!"),
        1 => format!("{name}'s {label} rose!"),
        2 => format!("{name}'s {label} rose sharply!"),
        n if n > 2 => format!("{name}'s {label} rose drastically!"),
        -1 => format!("{name}'s {label} fell!"),
        -2 => format!("{name}'s {label} harshly fell!"),
        _ => format!("{name}'s {label} severely fell!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        Element, MoveCategory, MoveId, SpeciesId, TraitDefinition, TraitEffect, TraitId,
        TraitRule, TraitTable,
    };
    use crate::state::{Combatant, CombatantId, Side, Stats, StatusKind};

    fn teams() -> Teams {
        let make = |id: u32| {
            Combatant::new(
                CombatantId(id),
                format!("c{id}"),
                SpeciesId(1),
                20,
                100,
                Stats::new(50, 50, 50, 50, 50),
                Element::Normal,
            )
        };
        Teams::new(vec![make(1).with_hp(50)], vec![make(2)])
    }

    fn scope(damage: u32) -> EffectScope {
        EffectScope {
            user: Slot::new(Side::Player, 0),
            target: Slot::new(Side::Opponent, 0),
            damage_dealt: damage,
        }
    }

    fn status_move(effect: MoveEffect) -> MoveDefinition {
        MoveDefinition::new(MoveId(9), "Test", Element::Normal, MoveCategory::Status, 0, 100)
            .with_effect(effect)
    }

    #[test]
    fn recoil_and_drain_use_damage_dealt() {
        let mut teams = teams();
        let mut state = CombatState::new();
        let mut rng = BattleRng::new(1);
        let mut messages = Vec::new();
        let mv = status_move(MoveEffect::on_opponent(EffectPayload::Drain { percent: 50 }))
            .with_effect(MoveEffect::on_user(EffectPayload::Recoil { percent: 10 }));

        apply_move_effects(
            &BattleEnv::empty(),
            &CombatParams::default(),
            &mv,
            scope(40),
            &mut teams,
            &mut state,
            &mut rng,
            &mut messages,
        );

        // +20 drained, -4 recoil
        assert_eq!(teams.get(Slot::new(Side::Player, 0)).map(|c| c.hp), Some(66));
        assert_eq!(teams.get(Slot::new(Side::Opponent, 0)).map(|c| c.hp), Some(100));
    }

    #[test]
    fn status_immunity_blocks_infliction() {
        let table = TraitTable::new().with(
            TraitDefinition::new(TraitId(1), "Insulated").with_rule(TraitRule::always(
                TraitEffect::StatusImmunity {
                    status: StatusKind::Paralyze,
                },
            )),
        );
        let env = BattleEnv::empty().with_traits(&table);
        let mut teams = teams();
        if let Some(target) = teams.get_mut(Slot::new(Side::Opponent, 0)) {
            target.traits.push(TraitId(1));
        }
        let mut state = CombatState::new();
        let mut messages = Vec::new();
        let mv = status_move(MoveEffect::on_opponent(EffectPayload::InflictStatus {
            status: StatusKind::Paralyze,
            turns: None,
        }));

        apply_move_effects(
            &env,
            &CombatParams::default(),
            &mv,
            scope(0),
            &mut teams,
            &mut state,
            &mut BattleRng::new(1),
            &mut messages,
        );

        assert!(!state.has_status(CombatantId(2), StatusKind::Paralyze));
        assert_eq!(messages, vec!["c2 is unaffected!".to_string()]);
    }

    #[test]
    fn stage_effect_reports_limit() {
        let mut teams = teams();
        let mut state = CombatState::new();
        state.modify_stat_stage(CombatantId(1), StatAxis::Attack, 6);
        let mut messages = Vec::new();
        let mv = status_move(MoveEffect::on_user(EffectPayload::StatStage {
            axis: StatAxis::Attack,
            stages: 2,
        }));

        apply_move_effects(
            &BattleEnv::empty(),
            &CombatParams::default(),
            &mv,
            scope(0),
            &mut teams,
            &mut state,
            &mut BattleRng::new(1),
            &mut messages,
        );

        assert_eq!(messages, vec!["c1's attack won't go any higher!".to_string()]);
    }

    #[test]
    fn repeated_guard_can_fail() {
        let mut teams = teams();
        let mut state = CombatState::new();
        state.get_mut(CombatantId(1)).consecutive_guards = 3;
        let params = CombatParams {
            guard_fail_step_percent: 100,
            guard_fail_cap_percent: 100,
            ..CombatParams::default()
        };
        let mv = status_move(MoveEffect::on_user(EffectPayload::Guard));
        let mut messages = Vec::new();

        apply_move_effects(
            &BattleEnv::empty(),
            &params,
            &mv,
            scope(0),
            &mut teams,
            &mut state,
            &mut BattleRng::new(1),
            &mut messages,
        );

        assert!(!state.get(CombatantId(1)).effects.has_guard());
        assert_eq!(state.get(CombatantId(1)).consecutive_guards, 3);
    }

    #[test]
    fn failed_guard_keeps_escalating() {
        let mut teams = teams();
        let mut state = CombatState::new();
        let params = CombatParams {
            guard_fail_step_percent: 100,
            guard_fail_cap_percent: 100,
            ..CombatParams::default()
        };
        let mv = status_move(MoveEffect::on_user(EffectPayload::Guard));
        let mut rng = BattleRng::new(1);
        let mut guarded = Vec::new();

        for _ in 0..3 {
            let mut messages = Vec::new();
            apply_move_effects(
                &BattleEnv::empty(),
                &params,
                &mv,
                scope(0),
                &mut teams,
                &mut state,
                &mut rng,
                &mut messages,
            );
            guarded.push(state.get(CombatantId(1)).effects.has_guard());
            state.tick();
        }

        assert_eq!(guarded, vec![true, false, false]);
        assert_eq!(state.get(CombatantId(1)).consecutive_guards, 1);
    }
}
