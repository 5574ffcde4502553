//! Persistent status conditions.
//!
//! A combatant carries at most one *primary* status (burn, freeze, paralysis,
//! poison, sleep) plus an independent confusion flag. Each entry counts down
//! once per end-of-turn upkeep and is dropped when it reaches zero.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

/// Status conditions a combatant can suffer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    Burn,
    Freeze,
    Paralyze,
    Poison,
    Sleep,
    /// Volatile: coexists with any primary status.
    Confusion,
}

impl StatusKind {
    /// Returns true for the mutually exclusive conditions.
    #[inline]
    pub const fn is_primary(self) -> bool {
        !matches!(self, StatusKind::Confusion)
    }

    /// Phrase used in record messages ("is burned", "fell asleep", ...).
    pub const fn inflicted_phrase(self) -> &'static str {
        match self {
            StatusKind::Burn => "was burned",
            StatusKind::Freeze => "was frozen solid",
            StatusKind::Paralyze => "is paralyzed",
            StatusKind::Poison => "was poisoned",
            StatusKind::Sleep => "fell asleep",
            StatusKind::Confusion => "became confused",
        }
    }

    pub const fn cured_phrase(self) -> &'static str {
        match self {
            StatusKind::Burn => "is no longer burned",
            StatusKind::Freeze => "thawed out",
            StatusKind::Paralyze => "is no longer paralyzed",
            StatusKind::Poison => "is no longer poisoned",
            StatusKind::Sleep => "woke up",
            StatusKind::Confusion => "snapped out of confusion",
        }
    }
}

/// One active status with its remaining duration in turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEntry {
    pub kind: StatusKind,
    pub turns_left: u32,
}

/// Active statuses on one combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusList {
    entries: ArrayVec<StatusEntry, { BattleConfig::MAX_STATUSES }>,
}

impl StatusList {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn empty() -> Self {
        Self {
            entries: ArrayVec::new_const(),
        }
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.entries.iter().any(|entry| entry.kind == kind)
    }

    /// The primary status, if any.
    pub fn primary(&self) -> Option<StatusKind> {
        self.entries
            .iter()
            .map(|entry| entry.kind)
            .find(|kind| kind.is_primary())
    }

    /// Adds a status.
    ///
    /// Returns false without changing anything when the exact status is
    /// already present, or when `kind` is primary and another primary status
    /// is active.
    pub fn add(&mut self, kind: StatusKind, turns: u32) -> bool {
        if turns == 0 || self.has(kind) {
            return false;
        }
        if kind.is_primary() && self.primary().is_some() {
            return false;
        }
        self.entries
            .try_push(StatusEntry {
                kind,
                turns_left: turns,
            })
            .is_ok()
    }

    pub fn remove(&mut self, kind: StatusKind) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.kind != kind);
        self.entries.len() != before
    }

    /// Removes every status and returns what was cleared.
    pub fn clear(&mut self) -> Vec<StatusKind> {
        self.entries.drain(..).map(|entry| entry.kind).collect()
    }

    /// Decrements every countdown and drops the entries that reach zero.
    pub fn tick(&mut self) -> Vec<StatusKind> {
        let mut expired = Vec::new();
        for entry in self.entries.iter_mut() {
            entry.turns_left = entry.turns_left.saturating_sub(1);
            if entry.turns_left == 0 {
                expired.push(entry.kind);
            }
        }
        self.entries.retain(|entry| entry.turns_left > 0);
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEntry> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_primary_status_is_rejected() {
        let mut list = StatusList::new();
        assert!(list.add(StatusKind::Burn, 5));
        assert!(!list.add(StatusKind::Poison, 5));
        assert!(!list.add(StatusKind::Burn, 5));
        assert_eq!(list.primary(), Some(StatusKind::Burn));
    }

    #[test]
    fn confusion_coexists_with_primary() {
        let mut list = StatusList::new();
        assert!(list.add(StatusKind::Sleep, 3));
        assert!(list.add(StatusKind::Confusion, 3));
        assert!(list.has(StatusKind::Sleep));
        assert!(list.has(StatusKind::Confusion));
        assert!(!list.add(StatusKind::Confusion, 3));
    }

    #[test]
    fn tick_drops_entries_reaching_zero() {
        let mut list = StatusList::new();
        list.add(StatusKind::Paralyze, 1);
        list.add(StatusKind::Confusion, 2);

        assert_eq!(list.tick(), vec![StatusKind::Paralyze]);
        assert!(!list.has(StatusKind::Paralyze));
        assert_eq!(list.tick(), vec![StatusKind::Confusion]);
        assert!(list.is_empty());
    }

    #[test]
    fn clear_returns_removed_statuses() {
        let mut list = StatusList::new();
        list.add(StatusKind::Poison, 4);
        list.add(StatusKind::Confusion, 4);
        assert_eq!(list.clear().len(), 2);
        assert!(list.is_empty());
    }
}
