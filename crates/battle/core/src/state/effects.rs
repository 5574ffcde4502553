//! Short-lived combat effects: shields, guard and flinch.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

/// Kinds of temporary effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemporaryEffectKind {
    /// Reduces incoming damage by `percent`.
    Shield { percent: u32 },
    /// Negates the next incoming damaging action. One-shot.
    Guard,
    /// Blocks exactly one action. Consumed when checked.
    Flinch,
}

impl TemporaryEffectKind {
    fn same_kind(&self, other: &Self) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemporaryEffect {
    pub kind: TemporaryEffectKind,
    pub turns_left: u32,
}

/// Temporary effects on one combatant. At most one entry per kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectList {
    entries: ArrayVec<TemporaryEffect, { BattleConfig::MAX_TEMPORARY_EFFECTS }>,
}

impl EffectList {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn empty() -> Self {
        Self {
            entries: ArrayVec::new_const(),
        }
    }

    /// Adds an effect, replacing any existing effect of the same kind.
    pub fn add(&mut self, kind: TemporaryEffectKind, turns: u32) {
        if turns == 0 {
            return;
        }
        self.entries.retain(|entry| !entry.kind.same_kind(&kind));
        // One slot per kind, so capacity is never exceeded.
        let _ = self.entries.try_push(TemporaryEffect {
            kind,
            turns_left: turns,
        });
    }

    pub fn has_guard(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.kind == TemporaryEffectKind::Guard)
    }

    /// Removes the guard if present. Returns true when one was consumed.
    pub fn take_guard(&mut self) -> bool {
        self.take(TemporaryEffectKind::Guard)
    }

    /// Removes the flinch if present. Returns true when one was consumed.
    pub fn take_flinch(&mut self) -> bool {
        self.take(TemporaryEffectKind::Flinch)
    }

    fn take(&mut self, kind: TemporaryEffectKind) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.kind != kind);
        self.entries.len() != before
    }

    /// Active shield reduction, capped at 100.
    pub fn shield_percent(&self) -> u32 {
        self.entries
            .iter()
            .filter_map(|entry| match entry.kind {
                TemporaryEffectKind::Shield { percent } => Some(percent),
                _ => None,
            })
            .max()
            .unwrap_or(0)
            .min(100)
    }

    pub fn tick(&mut self) -> Vec<TemporaryEffectKind> {
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

    pub fn iter(&self) -> impl Iterator<Item = &TemporaryEffect> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_is_one_shot() {
        let mut effects = EffectList::new();
        effects.add(TemporaryEffectKind::Guard, 1);
        assert!(effects.take_guard());
        assert!(!effects.take_guard());
    }

    #[test]
    fn newer_shield_replaces_older() {
        let mut effects = EffectList::new();
        effects.add(TemporaryEffectKind::Shield { percent: 20 }, 3);
        effects.add(TemporaryEffectKind::Shield { percent: 50 }, 2);
        assert_eq!(effects.shield_percent(), 50);
        assert_eq!(effects.iter().count(), 1);
    }

    #[test]
    fn expired_effects_drop_on_tick() {
        let mut effects = EffectList::new();
        effects.add(TemporaryEffectKind::Flinch, 1);
        effects.add(TemporaryEffectKind::Shield { percent: 30 }, 2);
        assert_eq!(effects.tick(), vec![TemporaryEffectKind::Flinch]);
        assert_eq!(effects.shield_percent(), 30);
        effects.tick();
        assert!(effects.is_empty());
    }
}
