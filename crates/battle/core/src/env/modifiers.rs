//! Injected damage modifiers.
//!
//! Skills, consumables and other meta-game bonuses live outside the simulator.
//! They reach the calculator only through a [`DamageModifierProvider`] handed
//! in with the [`BattleEnv`](super::BattleEnv); without one every hook is
//! neutral.

use crate::state::{Combatant, Side};

/// Boss facts a provider may gate on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossContext {
    pub tier: u32,
    /// A phase transition fired this turn.
    pub just_transitioned: bool,
}

/// Hooks into the damage multiplier chain. All percentages are integers.
pub trait DamageModifierProvider: Send + Sync {
    /// Global outgoing damage percent (100 = unchanged).
    fn global_damage_percent(&self, _attacker: &Combatant, _side: Side) -> u32 {
        100
    }

    /// Extra critical chance in basis points.
    fn crit_chance_bp(&self, _attacker: &Combatant, _side: Side) -> u32 {
        0
    }

    /// Extra critical damage percentage added to the base multiplier.
    fn crit_damage_percent(&self, _attacker: &Combatant, _side: Side) -> u32 {
        0
    }

    /// Damage percent for a non-boss attacker hitting a boss.
    fn boss_damage_percent(&self, _attacker: &Combatant, _side: Side, _boss: BossContext) -> u32 {
        100
    }

    /// Reduction percent applied when a boss hits `defender`.
    fn boss_damage_reduction_percent(
        &self,
        _defender: &Combatant,
        _side: Side,
        _boss: BossContext,
    ) -> u32 {
        0
    }
}

/// Provider with every hook neutral.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoModifiers;

impl DamageModifierProvider for NoModifiers {}

/// Side-wide flat modifiers, typically filled from a player's loadout of
/// skills and consumables before the battle starts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlatModifiers {
    /// Extra outgoing damage percent per side (0 = unchanged).
    pub damage_bonus_percent: [u32; 2],
    pub crit_chance_bp: [u32; 2],
    pub crit_damage_percent: [u32; 2],
    /// Extra damage against bosses of at least `boss_bonus_min_tier`.
    pub boss_bonus_percent: u32,
    pub boss_bonus_min_tier: u32,
    /// Extra damage against a boss on the turn it changed phase.
    pub transition_bonus_percent: u32,
    /// Reduction of boss damage taken by the player side.
    pub boss_guard_percent: u32,
}

impl DamageModifierProvider for FlatModifiers {
    fn global_damage_percent(&self, _attacker: &Combatant, side: Side) -> u32 {
        100 + self.damage_bonus_percent[side.index()]
    }

    fn crit_chance_bp(&self, _attacker: &Combatant, side: Side) -> u32 {
        self.crit_chance_bp[side.index()]
    }

    fn crit_damage_percent(&self, _attacker: &Combatant, side: Side) -> u32 {
        self.crit_damage_percent[side.index()]
    }

    fn boss_damage_percent(&self, _attacker: &Combatant, side: Side, boss: BossContext) -> u32 {
        if side != Side::Player {
            return 100;
        }
        let mut percent = 100;
        if boss.tier >= self.boss_bonus_min_tier {
            percent += self.boss_bonus_percent;
        }
        if boss.just_transitioned {
            percent += self.transition_bonus_percent;
        }
        percent
    }

    fn boss_damage_reduction_percent(
        &self,
        _defender: &Combatant,
        side: Side,
        _boss: BossContext,
    ) -> u32 {
        if side == Side::Player {
            self.boss_guard_percent.min(100)
        } else {
            0
        }
    }
}
