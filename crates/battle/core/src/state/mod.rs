//! Per-battle mutable modifiers.
//!
//! [`CombatState`] is created when a battle starts, mutated every turn and
//! discarded at the end. It holds everything that changes during combat except
//! HP: stat stages, statuses, temporary effects, the turn counter, the active
//! index per side and the per-combatant counters the rules consult.
mod combatant;
mod effects;
mod stages;
mod status;
mod teams;

use std::collections::{BTreeMap, BTreeSet};

pub use combatant::{Combatant, CombatantId, HeldBonus, MoveSlot, Side, StatKind, Stats};
pub use effects::{EffectList, TemporaryEffect, TemporaryEffectKind};
pub use stages::{
    MAX_STAGE, MIN_STAGE, StatAxis, StatStages, precision_stage_permille, stat_stage_permille,
};
pub use status::{StatusEntry, StatusKind, StatusList};
pub use teams::{Slot, Teams};

use crate::env::{Element, MoveId};

/// Boss phase progress. Percentages compound across phases (100 = unchanged).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseState {
    /// Index of the next phase that has not triggered yet.
    pub next_phase: usize,
    pub attack_percent: u32,
    pub defense_percent: u32,
    pub speed_percent: u32,
    /// Set when a phase triggered this turn; cleared by upkeep.
    pub just_transitioned: bool,
    pub element_override: Option<Element>,
}

impl PhaseState {
    pub const fn new() -> Self {
        Self {
            next_phase: 0,
            attack_percent: 100,
            defense_percent: 100,
            speed_percent: 100,
            just_transitioned: false,
            element_override: None,
        }
    }
}

impl Default for PhaseState {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracker entry for one combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantState {
    pub stages: StatStages,
    pub statuses: StatusList,
    pub effects: EffectList,
    pub last_move: Option<MoveId>,
    pub consecutive_guards: u32,
    pub knockouts: u32,
    /// Set by the first end-of-turn upkeep.
    pub past_first_turn: bool,
    pub uses_spent: BTreeMap<MoveId, u32>,
    pub phase: PhaseState,
}

static EMPTY_STATE: CombatantState = CombatantState::empty();

impl CombatantState {
    pub const fn empty() -> Self {
        Self {
            stages: StatStages::neutral(),
            statuses: StatusList::empty(),
            effects: EffectList::empty(),
            last_move: None,
            consecutive_guards: 0,
            knockouts: 0,
            past_first_turn: false,
            uses_spent: BTreeMap::new(),
            phase: PhaseState::new(),
        }
    }

    /// Uses left in `slot` after what this battle has spent.
    pub fn remaining_uses(&self, slot: &MoveSlot) -> u32 {
        let spent = self.uses_spent.get(&slot.move_id).copied().unwrap_or(0);
        slot.uses.saturating_sub(spent)
    }

    pub fn spend_use(&mut self, move_id: MoveId) {
        *self.uses_spent.entry(move_id).or_insert(0) += 1;
    }

    /// Affinity after any elemental shift.
    pub fn element_of(&self, combatant: &Combatant) -> Element {
        self.phase.element_override.unwrap_or(combatant.element)
    }
}

/// Something that ran out during an upkeep tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expired {
    Status(StatusKind),
    Effect(TemporaryEffectKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Expiration {
    pub combatant: CombatantId,
    pub expired: Expired,
}

/// Per-battle modifier tracker.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    turn: u32,
    active: [usize; 2],
    acted: BTreeSet<CombatantId>,
    combatants: BTreeMap<CombatantId, CombatantState>,
}

impl CombatState {
    pub fn new() -> Self {
        Self {
            turn: 1,
            active: [0, 0],
            acted: BTreeSet::new(),
            combatants: BTreeMap::new(),
        }
    }

    /// Creates the tracker entry for `id`. Calling it again is a no-op.
    pub fn initialize(&mut self, id: CombatantId) {
        self.combatants.entry(id).or_default();
    }

    /// Current turn, starting at 1.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn active(&self, side: Side) -> usize {
        self.active[side.index()]
    }

    pub fn set_active(&mut self, side: Side, index: usize) {
        self.active[side.index()] = index;
    }

    pub fn mark_acted(&mut self, id: CombatantId) {
        self.acted.insert(id);
    }

    pub fn has_acted(&self, id: CombatantId) -> bool {
        self.acted.contains(&id)
    }

    /// Tracker entry for `id`; an untracked combatant reads as neutral.
    pub fn get(&self, id: CombatantId) -> &CombatantState {
        self.combatants.get(&id).unwrap_or(&EMPTY_STATE)
    }

    /// Mutable tracker entry, created on first access.
    pub fn get_mut(&mut self, id: CombatantId) -> &mut CombatantState {
        self.combatants.entry(id).or_default()
    }

    pub fn stat_stage(&self, id: CombatantId, axis: StatAxis) -> i8 {
        self.get(id).stages.get(axis)
    }

    /// Shifts a stage and returns the delta actually applied after clamping.
    pub fn modify_stat_stage(&mut self, id: CombatantId, axis: StatAxis, delta: i32) -> i32 {
        self.get_mut(id).stages.modify(axis, delta)
    }

    pub fn has_status(&self, id: CombatantId, kind: StatusKind) -> bool {
        self.get(id).statuses.has(kind)
    }

    /// Adds a status. Returns false when the status rules reject it.
    pub fn add_status(&mut self, id: CombatantId, kind: StatusKind, turns: u32) -> bool {
        self.get_mut(id).statuses.add(kind, turns)
    }

    pub fn remove_status(&mut self, id: CombatantId, kind: StatusKind) -> bool {
        self.get_mut(id).statuses.remove(kind)
    }

    pub fn add_effect(&mut self, id: CombatantId, kind: TemporaryEffectKind, turns: u32) {
        self.get_mut(id).effects.add(kind, turns);
    }

    /// End-of-turn upkeep.
    ///
    /// Advances the turn counter, clears the acted set, counts every status
    /// and effect down by one and drops those reaching zero. Returns what
    /// expired, in combatant id order.
    pub fn tick(&mut self) -> Vec<Expiration> {
        self.turn += 1;
        self.acted.clear();

        let mut expirations = Vec::new();
        for (&id, entry) in self.combatants.iter_mut() {
            entry.phase.just_transitioned = false;
            entry.past_first_turn = true;
            for kind in entry.statuses.tick() {
                expirations.push(Expiration {
                    combatant: id,
                    expired: Expired::Status(kind),
                });
            }
            for kind in entry.effects.tick() {
                expirations.push(Expiration {
                    combatant: id,
                    expired: Expired::Effect(kind),
                });
            }
        }
        expirations
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CombatantId, &CombatantState)> {
        self.combatants.iter()
    }
}

impl Default for CombatState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_is_idempotent() {
        let mut state = CombatState::new();
        let id = CombatantId(4);
        state.initialize(id);
        state.modify_stat_stage(id, StatAxis::Speed, 2);
        state.initialize(id);
        assert_eq!(state.stat_stage(id, StatAxis::Speed), 2);
    }

    #[test]
    fn untracked_combatant_reads_neutral() {
        let state = CombatState::new();
        assert_eq!(state.stat_stage(CombatantId(9), StatAxis::Attack), 0);
        assert!(!state.has_status(CombatantId(9), StatusKind::Burn));
    }

    #[test]
    fn tick_advances_turn_and_expires_entries() {
        let mut state = CombatState::new();
        let id = CombatantId(1);
        state.add_status(id, StatusKind::Sleep, 1);
        state.add_effect(id, TemporaryEffectKind::Guard, 1);
        state.mark_acted(id);
        state.get_mut(id).phase.just_transitioned = true;
        assert!(!state.get(id).past_first_turn);

        let expired = state.tick();

        assert_eq!(state.turn(), 2);
        assert!(!state.has_acted(id));
        assert_eq!(expired.len(), 2);
        assert!(!state.has_status(id, StatusKind::Sleep));
        assert!(!state.get(id).effects.has_guard());
        assert!(!state.get(id).phase.just_transitioned);
        assert!(state.get(id).past_first_turn);
    }

    #[test]
    fn remaining_uses_account_for_spent() {
        let mut entry = CombatantState::default();
        let slot = MoveSlot::new(MoveId(3), 2);
        entry.spend_use(MoveId(3));
        assert_eq!(entry.remaining_uses(&slot), 1);
        entry.spend_use(MoveId(3));
        entry.spend_use(MoveId(3));
        assert_eq!(entry.remaining_uses(&slot), 0);
    }
}
