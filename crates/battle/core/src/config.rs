/// Battle configuration constants and tunable parameters.
///
/// Every probabilistic or numeric rule the simulator applies reads its value
/// from here, so balance changes never touch the resolution code.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Hard cap on resolved turns. Reaching it ends the battle as a timeout.
    pub turn_cap: u32,

    /// Largest roster accepted per side at battle start.
    pub max_team_size: usize,

    /// Rule constants used by the damage & effects calculator.
    pub combat: CombatParams,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_MOVES: usize = 4;
    pub const MAX_STATUSES: usize = 2;
    pub const MAX_TEMPORARY_EFFECTS: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TURN_CAP: u32 = 100;
    pub const DEFAULT_MAX_TEAM_SIZE: usize = 6;

    pub fn new() -> Self {
        Self {
            turn_cap: Self::DEFAULT_TURN_CAP,
            max_team_size: Self::DEFAULT_MAX_TEAM_SIZE,
            combat: CombatParams::default(),
        }
    }

    pub fn with_turn_cap(mut self, turn_cap: u32) -> Self {
        self.turn_cap = turn_cap;
        self
    }

    pub fn with_combat(mut self, combat: CombatParams) -> Self {
        self.combat = combat;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Balance parameters for combat resolution.
///
/// Percentages are stored as integers (150 = ×1.5). Critical chances are in
/// basis points (625 = 6.25%) so the base rate stays exact.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatParams {
    // Critical hits
    pub crit_base_bp: u32,
    pub crit_stage_bp: u32,
    pub crit_damage_percent: u32,

    // Damage variance, inclusive range
    pub variance_min_percent: u32,
    pub variance_max_percent: u32,

    // Elemental multipliers
    pub stab_percent: u32,
    pub super_effective_percent: u32,
    pub resisted_percent: u32,
    pub absorb_heal_percent: u32,

    // Burn / poison
    pub burn_attack_percent: u32,
    pub burn_tick_divisor: u32,
    pub poison_tick_divisor: u32,

    // Can-act gate
    pub sleep_wake_percent: u32,
    pub freeze_thaw_percent: u32,
    pub paralysis_block_percent: u32,
    pub paralysis_speed_percent: u32,
    pub confusion_self_hit_percent: u32,
    pub confusion_self_hit_power: u32,
    pub confusion_snap_percent: u32,

    // Guard
    pub guard_fail_step_percent: u32,
    pub guard_fail_cap_percent: u32,

    // Durations and trait thresholds
    pub default_status_turns: u32,
    pub low_hp_percent: u32,
    pub high_hp_percent: u32,

    // Fallback move used when a move id is unknown or the loadout is spent
    pub desperation_power: u32,
    pub desperation_recoil_percent: u32,

    /// Ordering priority of a voluntary swap. Above every move priority.
    pub swap_priority: i32,
}

impl Default for CombatParams {
    fn default() -> Self {
        Self {
            crit_base_bp: 625,
            crit_stage_bp: 625,
            crit_damage_percent: 150,
            variance_min_percent: 90,
            variance_max_percent: 110,
            stab_percent: 150,
            super_effective_percent: 150,
            resisted_percent: 50,
            absorb_heal_percent: 25,
            burn_attack_percent: 50,
            burn_tick_divisor: 16,
            poison_tick_divisor: 8,
            sleep_wake_percent: 33,
            freeze_thaw_percent: 20,
            paralysis_block_percent: 25,
            paralysis_speed_percent: 50,
            confusion_self_hit_percent: 33,
            confusion_self_hit_power: 40,
            confusion_snap_percent: 25,
            guard_fail_step_percent: 35,
            guard_fail_cap_percent: 95,
            default_status_turns: 5,
            low_hp_percent: 33,
            high_hp_percent: 80,
            desperation_power: 50,
            desperation_recoil_percent: 25,
            swap_priority: 7,
        }
    }
}

impl CombatParams {
    /// Parameters with every random element pinned: no crits, no variance.
    ///
    /// Useful for reproducing exact damage figures.
    pub fn fixed_rolls() -> Self {
        Self {
            crit_base_bp: 0,
            crit_stage_bp: 0,
            variance_min_percent: 100,
            variance_max_percent: 100,
            ..Self::default()
        }
    }

    /// Failure chance of a guard attempt after `consecutive` successful guards.
    pub fn guard_fail_percent(&self, consecutive: u32) -> u32 {
        consecutive
            .saturating_mul(self.guard_fail_step_percent)
            .min(self.guard_fail_cap_percent)
    }
}
