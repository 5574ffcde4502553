//! Move definitions and the move lookup oracle.

use crate::config::CombatParams;
use crate::state::{StatAxis, StatusKind};

use super::tables::Element;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveId(pub u16);

impl MoveId {
    /// Reserved id of the fallback move used when nothing else is usable.
    pub const DESPERATION: MoveId = MoveId(u16::MAX);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MoveCategory {
    #[default]
    Physical,
    Special,
    /// Deals no damage; only effects apply.
    Status,
}

/// Who an effect lands on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectTarget {
    User,
    #[default]
    Opponent,
}

/// Typed effect payloads a move can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectPayload {
    /// `turns: None` uses the configured default duration.
    InflictStatus {
        status: StatusKind,
        turns: Option<u32>,
    },
    StatStage {
        axis: StatAxis,
        stages: i32,
    },
    /// Percent of the target's max HP.
    Heal {
        percent: u32,
    },
    FullHeal,
    /// Percent of the damage this action dealt, taken by the user.
    Recoil {
        percent: u32,
    },
    /// Percent of the damage this action dealt, restored to the user.
    Drain {
        percent: u32,
    },
    Shield {
        percent: u32,
        turns: u32,
    },
    Flinch,
    Guard,
    /// Removes every status from the target.
    Cleanse,
}

/// One effect entry with its own proc chance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveEffect {
    /// Proc chance in percent. 100 always applies.
    #[cfg_attr(feature = "serde", serde(default = "always"))]
    pub chance: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: EffectTarget,
    pub payload: EffectPayload,
}

#[cfg(feature = "serde")]
fn always() -> u32 {
    100
}

impl MoveEffect {
    pub const fn new(chance: u32, target: EffectTarget, payload: EffectPayload) -> Self {
        Self {
            chance,
            target,
            payload,
        }
    }

    /// Guaranteed effect on the opponent.
    pub const fn on_opponent(payload: EffectPayload) -> Self {
        Self::new(100, EffectTarget::Opponent, payload)
    }

    /// Guaranteed effect on the user.
    pub const fn on_user(payload: EffectPayload) -> Self {
        Self::new(100, EffectTarget::User, payload)
    }
}

/// Static move data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveDefinition {
    pub id: MoveId,
    pub name: String,
    pub element: Element,
    pub category: MoveCategory,
    pub power: u32,
    /// Hit chance in percent. 100 or more never misses.
    pub accuracy: u32,
    /// Default use budget when a loadout is built from this definition.
    pub max_uses: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,
    /// Extra critical stages granted by the move.
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_stage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<MoveEffect>,
}

impl MoveDefinition {
    pub fn new(
        id: MoveId,
        name: impl Into<String>,
        element: Element,
        category: MoveCategory,
        power: u32,
        accuracy: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            element,
            category,
            power,
            accuracy,
            max_uses: 10,
            priority: 0,
            crit_stage: 0,
            effects: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_max_uses(mut self, max_uses: u32) -> Self {
        self.max_uses = max_uses;
        self
    }

    pub fn with_crit_stage(mut self, crit_stage: u32) -> Self {
        self.crit_stage = crit_stage;
        self
    }

    pub fn with_effect(mut self, effect: MoveEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// The fixed fallback move: typeless, never misses, hurts its user.
    pub fn desperation(params: &CombatParams) -> Self {
        Self::new(
            MoveId::DESPERATION,
            "Desperation",
            Element::Normal,
            MoveCategory::Physical,
            params.desperation_power,
            100,
        )
        .with_max_uses(0)
        .with_effect(MoveEffect::on_user(EffectPayload::Recoil {
            percent: params.desperation_recoil_percent,
        }))
    }

    #[inline]
    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::Status && self.power > 0
    }

    #[inline]
    pub fn never_misses(&self) -> bool {
        self.accuracy >= 100
    }

    pub fn is_guard(&self) -> bool {
        self.effects
            .iter()
            .any(|effect| effect.payload == EffectPayload::Guard)
    }
}

/// Read-only move lookup.
pub trait MoveOracle: Send + Sync {
    fn definition(&self, id: MoveId) -> Option<MoveDefinition>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desperation_follows_params() {
        let params = CombatParams::default();
        let fallback = MoveDefinition::desperation(&params);
        assert_eq!(fallback.id, MoveId::DESPERATION);
        assert_eq!(fallback.power, params.desperation_power);
        assert!(fallback.never_misses());
        assert!(fallback.is_damaging());
        assert_eq!(
            fallback.effects[0].payload,
            EffectPayload::Recoil {
                percent: params.desperation_recoil_percent
            }
        );
    }

    #[test]
    fn status_moves_are_not_damaging() {
        let guard = MoveDefinition::new(
            MoveId(1),
            "Guard",
            Element::Normal,
            MoveCategory::Status,
            0,
            100,
        )
        .with_effect(MoveEffect::on_user(EffectPayload::Guard));
        assert!(!guard.is_damaging());
        assert!(guard.is_guard());
    }
}
