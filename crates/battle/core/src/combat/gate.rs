//! Can-act gate.
//!
//! Evaluated before a move resolves, in this order:
//!
//! 1. flinch: consumed, blocks the action
//! 2. primary status: sleep and freeze roll to end, otherwise block;
//!    paralysis rolls to block without curing
//! 3. confusion: rolls to snap out, otherwise may hit itself instead of acting
//!
//! At most one check blocks a given action.

use crate::config::CombatParams;
use crate::env::{BattleRng, TraitDefinition};
use crate::state::{Combatant, CombatantState, StatusKind};

use super::damage::confusion_damage;

/// Why an action did not happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BlockReason {
    Flinched,
    Asleep,
    Frozen,
    Paralyzed,
    /// Hit itself in confusion.
    Confused,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GateResult {
    pub blocked: Option<BlockReason>,
    /// Damage the actor deals to itself (confusion only).
    pub self_damage: u32,
    pub messages: Vec<String>,
}

impl GateResult {
    fn block(mut self, reason: BlockReason, message: String) -> Self {
        self.blocked = Some(reason);
        self.messages.push(message);
        self
    }

    pub fn can_act(&self) -> bool {
        self.blocked.is_none()
    }
}

pub fn check_can_act(
    actor: &Combatant,
    state: &mut CombatantState,
    traits: &[TraitDefinition],
    params: &CombatParams,
    rng: &mut BattleRng,
) -> GateResult {
    let name = &actor.name;
    let mut result = GateResult::default();

    if state.effects.take_flinch() {
        return result.block(BlockReason::Flinched, format!("{name} flinched!"));
    }

    match state.statuses.primary() {
        Some(StatusKind::Sleep) => {
            if rng.roll_percent(params.sleep_wake_percent) {
                state.statuses.remove(StatusKind::Sleep);
                result.messages.push(format!("{name} woke up!"));
            } else {
                return result.block(BlockReason::Asleep, format!("{name} is fast asleep."));
            }
        }
        Some(StatusKind::Freeze) => {
            if rng.roll_percent(params.freeze_thaw_percent) {
                state.statuses.remove(StatusKind::Freeze);
                result.messages.push(format!("{name} thawed out!"));
            } else {
                return result.block(BlockReason::Frozen, format!("{name} is frozen solid!"));
            }
        }
        Some(StatusKind::Paralyze) => {
            if rng.roll_percent(params.paralysis_block_percent) {
                return result.block(
                    BlockReason::Paralyzed,
                    format!("{name} is paralyzed! It can't move!"),
                );
            }
        }
        _ => {}
    }

    if state.statuses.has(StatusKind::Confusion) {
        if rng.roll_percent(params.confusion_snap_percent) {
            state.statuses.remove(StatusKind::Confusion);
            result
                .messages
                .push(format!("{name} snapped out of its confusion!"));
        } else if rng.roll_percent(params.confusion_self_hit_percent) {
            result.self_damage = confusion_damage(actor, state, traits, params);
            return result.block(
                BlockReason::Confused,
                format!("{name} hurt itself in its confusion!"),
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Element, SpeciesId};
    use crate::state::{CombatantId, Stats, TemporaryEffectKind};

    fn actor() -> Combatant {
        Combatant::new(
            CombatantId(1),
            "Sparky",
            SpeciesId(1),
            20,
            60,
            Stats::new(40, 40, 40, 40, 40),
            Element::Electric,
        )
    }

    #[test]
    fn flinch_blocks_once_and_is_consumed() {
        let c = actor();
        let mut state = CombatantState::default();
        state.effects.add(TemporaryEffectKind::Flinch, 1);
        let params = CombatParams::default();
        let mut rng = BattleRng::new(5);

        let first = check_can_act(&c, &mut state, &[], &params, &mut rng);
        assert_eq!(first.blocked, Some(BlockReason::Flinched));
        let second = check_can_act(&c, &mut state, &[], &params, &mut rng);
        assert!(second.can_act());
    }

    #[test]
    fn sleep_blocks_until_wake_roll_succeeds() {
        let c = actor();
        let mut state = CombatantState::default();
        state.statuses.add(StatusKind::Sleep, 5);
        let mut rng = BattleRng::new(5);

        let never = CombatParams {
            sleep_wake_percent: 0,
            ..CombatParams::default()
        };
        let result = check_can_act(&c, &mut state, &[], &never, &mut rng);
        assert_eq!(result.blocked, Some(BlockReason::Asleep));
        assert!(state.statuses.has(StatusKind::Sleep));

        let always = CombatParams {
            sleep_wake_percent: 100,
            ..CombatParams::default()
        };
        let result = check_can_act(&c, &mut state, &[], &always, &mut rng);
        assert!(result.can_act());
        assert!(!state.statuses.has(StatusKind::Sleep));
    }

    #[test]
    fn freeze_blocks_until_thawed() {
        let c = actor();
        let mut state = CombatantState::default();
        state.statuses.add(StatusKind::Freeze, 5);
        let mut rng = BattleRng::new(8);

        let frozen = CombatParams {
            freeze_thaw_percent: 0,
            ..CombatParams::default()
        };
        let result = check_can_act(&c, &mut state, &[], &frozen, &mut rng);
        assert_eq!(result.blocked, Some(BlockReason::Frozen));
        assert_eq!(result.messages, vec!["Sparky is frozen solid!".to_string()]);
        assert!(state.statuses.has(StatusKind::Freeze));

        let thaw = CombatParams {
            freeze_thaw_percent: 100,
            ..CombatParams::default()
        };
        let result = check_can_act(&c, &mut state, &[], &thaw, &mut rng);
        assert!(result.can_act());
        assert_eq!(result.messages, vec!["Sparky thawed out!".to_string()]);
        assert!(!state.statuses.has(StatusKind::Freeze));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn paralysis_blocks_without_curing() {
        let c = actor();
        let mut state = CombatantState::default();
        state.statuses.add(StatusKind::Paralyze, 5);
        let params = CombatParams {
            paralysis_block_percent: 100,
            ..CombatParams::default()
        };
        let result = check_can_act(&c, &mut state, &[], &params, &mut BattleRng::new(1));
        assert_eq!(result.blocked, Some(BlockReason::Paralyzed));
        assert!(state.statuses.has(StatusKind::Paralyze));
    }

    #[test]
    fn confusion_self_hit_reports_damage() {
        let c = actor();
        let mut state = CombatantState::default();
        state.statuses.add(StatusKind::Confusion, 5);
        let params = CombatParams {
            confusion_snap_percent: 0,
            confusion_self_hit_percent: 100,
            ..CombatParams::default()
        };
        let result = check_can_act(&c, &mut state, &[], &params, &mut BattleRng::new(1));
        assert_eq!(result.blocked, Some(BlockReason::Confused));
        assert!(result.self_damage >= 1);
    }

    #[test]
    fn flinch_takes_precedence_over_status() {
        let c = actor();
        let mut state = CombatantState::default();
        state.effects.add(TemporaryEffectKind::Flinch, 1);
        state.statuses.add(StatusKind::Sleep, 5);
        let params = CombatParams {
            sleep_wake_percent: 0,
            ..CombatParams::default()
        };
        let result = check_can_act(&c, &mut state, &[], &params, &mut BattleRng::new(1));
        assert_eq!(result.blocked, Some(BlockReason::Flinched));
        assert_eq!(result.messages.len(), 1);
    }
}
