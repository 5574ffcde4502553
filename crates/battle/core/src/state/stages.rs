//! Stat stages and their multiplier curves.

use super::combatant::StatKind;

pub const MIN_STAGE: i8 = -6;
pub const MAX_STAGE: i8 = 6;

/// Every axis tracked by the stage map: the five battle stats plus the two
/// precision axes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatAxis {
    Attack,
    Defense,
    SpAttack,
    SpDefense,
    Speed,
    Accuracy,
    Evasion,
}

impl StatAxis {
    pub const COUNT: usize = 7;

    pub const ALL: [StatAxis; Self::COUNT] = [
        StatAxis::Attack,
        StatAxis::Defense,
        StatAxis::SpAttack,
        StatAxis::SpDefense,
        StatAxis::Speed,
        StatAxis::Accuracy,
        StatAxis::Evasion,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Accuracy and evasion use their own multiplier curve.
    #[inline]
    pub const fn is_precision(self) -> bool {
        matches!(self, StatAxis::Accuracy | StatAxis::Evasion)
    }

    /// Multiplier for `stage` on this axis, in permille (1000 = ×1.0).
    pub fn multiplier_permille(self, stage: i8) -> u32 {
        if self.is_precision() {
            precision_stage_permille(stage)
        } else {
            stat_stage_permille(stage)
        }
    }

    /// Human-readable label used in record messages.
    pub const fn label(self) -> &'static str {
        match self {
            StatAxis::Attack => "attack",
            StatAxis::Defense => "defense",
            StatAxis::SpAttack => "special attack",
            StatAxis::SpDefense => "special defense",
            StatAxis::Speed => "speed",
            StatAxis::Accuracy => "accuracy",
            StatAxis::Evasion => "evasion",
        }
    }
}

impl From<StatKind> for StatAxis {
    fn from(stat: StatKind) -> Self {
        match stat {
            StatKind::Attack => StatAxis::Attack,
            StatKind::Defense => StatAxis::Defense,
            StatKind::SpAttack => StatAxis::SpAttack,
            StatKind::SpDefense => StatAxis::SpDefense,
            StatKind::Speed => StatAxis::Speed,
        }
    }
}

const STAT_CURVE: [u32; 13] = [
    250, 290, 330, 400, 500, 670, 1000, 1500, 2000, 2500, 3000, 3500, 4000,
];

const PRECISION_CURVE: [u32; 13] = [
    330, 375, 430, 500, 600, 750, 1000, 1330, 1670, 2000, 2330, 2670, 3000,
];

#[inline]
fn curve_index(stage: i8) -> usize {
    (stage.clamp(MIN_STAGE, MAX_STAGE) - MIN_STAGE) as usize
}

/// Battle-stat multiplier for a stage, in permille.
pub fn stat_stage_permille(stage: i8) -> u32 {
    STAT_CURVE[curve_index(stage)]
}

/// Accuracy/evasion multiplier for a stage, in permille.
pub fn precision_stage_permille(stage: i8) -> u32 {
    PRECISION_CURVE[curve_index(stage)]
}

/// Stage map for one combatant. Every entry stays within `[-6, 6]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatStages([i8; StatAxis::COUNT]);

impl StatStages {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn neutral() -> Self {
        Self([0; StatAxis::COUNT])
    }

    #[inline]
    pub fn get(&self, axis: StatAxis) -> i8 {
        self.0[axis.index()]
    }

    /// Applies `delta` and returns the change that actually took effect after
    /// clamping. A return of 0 means the stage was already at its limit.
    pub fn modify(&mut self, axis: StatAxis, delta: i32) -> i32 {
        let current = self.0[axis.index()] as i32;
        let next = current
            .saturating_add(delta)
            .clamp(MIN_STAGE as i32, MAX_STAGE as i32);
        self.0[axis.index()] = next as i8;
        next - current
    }

    pub fn reset(&mut self) {
        self.0 = [0; StatAxis::COUNT];
    }

    pub fn is_neutral(&self) -> bool {
        self.0.iter().all(|&stage| stage == 0)
    }
}
