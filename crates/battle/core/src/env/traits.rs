//! Trait (passive ability) definitions.
//!
//! A trait is a list of rules. Each rule pairs an effect with the predicate
//! that gates it; the calculator folds every rule whose predicate holds.

use crate::state::{StatKind, StatusKind};

use super::tables::Element;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraitId(pub u16);

/// Predicate gating a trait rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraitCondition {
    #[default]
    Always,
    /// HP strictly below the low-HP threshold.
    LowHp,
    /// HP strictly above the high-HP threshold.
    HighHp,
    /// Only on the holder's first action of the battle.
    FirstTurn,
    /// The move shares the holder's affinity.
    SameTypeMove,
    /// The move's power is at most this value.
    PowerAtMost(u32),
    MoveElement(Element),
}

/// Hook that fires when the holder is swapped out voluntarily.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwitchOutHook {
    /// Restores a percentage of max HP.
    Heal { percent: u32 },
    /// Removes every status.
    CureStatus,
}

/// What a trait rule does once its condition holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraitEffect {
    /// Flat percentage on a battle stat.
    StatBonus { stat: StatKind, percent: i32 },
    /// Outgoing damage multiplier (+percent).
    DamageBoost { percent: u32 },
    /// Incoming damage reduction (-percent).
    DamageReduction { percent: u32 },
    /// +percent outgoing damage per knockout scored, up to `max_stacks`.
    KnockoutScaling { percent_per_ko: u32, max_stacks: u32 },
    /// Extra critical chance in basis points.
    CritChance { bp: u32 },
    /// Extra critical damage percentage, added to the base crit multiplier.
    CritDamage { percent: u32 },
    /// Additive hit-chance adjustment for the holder's moves.
    Accuracy { percent: i32 },
    /// Additive hit-chance adjustment against the holder.
    Evasion { percent: i32 },
    /// Reduces recoil the holder takes.
    RecoilReduction { percent: u32 },
    StatusImmunity { status: StatusKind },
    OnSwitchOut(SwitchOutHook),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraitRule {
    #[cfg_attr(feature = "serde", serde(default))]
    pub when: TraitCondition,
    pub effect: TraitEffect,
}

impl TraitRule {
    pub const fn always(effect: TraitEffect) -> Self {
        Self {
            when: TraitCondition::Always,
            effect,
        }
    }

    pub const fn when(when: TraitCondition, effect: TraitEffect) -> Self {
        Self { when, effect }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraitDefinition {
    pub id: TraitId,
    pub name: String,
    pub rules: Vec<TraitRule>,
}

impl TraitDefinition {
    pub fn new(id: TraitId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: TraitRule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Read-only trait lookup.
pub trait TraitOracle: Send + Sync {
    fn definition(&self, id: TraitId) -> Option<TraitDefinition>;
}
