//! Caller-owned combatant data.
//!
//! A [`Combatant`] is the stat block a caller hands to the simulator. The core
//! only ever writes its `hp`; every other in-battle modification lives in the
//! [`CombatState`](super::CombatState) tracker and is layered on top.

use arrayvec::ArrayVec;

use crate::boss::BossProfile;
use crate::config::BattleConfig;
use crate::env::{Element, MoveId, SpeciesId, TraitId};

/// Stable identity of a combatant within one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl core::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two sides of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// The five battle stats.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    Attack,
    Defense,
    SpAttack,
    SpDefense,
    Speed,
}

/// Base stat block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub attack: u32,
    pub defense: u32,
    pub sp_attack: u32,
    pub sp_defense: u32,
    pub speed: u32,
}

impl Stats {
    pub const fn new(attack: u32, defense: u32, sp_attack: u32, sp_defense: u32, speed: u32) -> Self {
        Self {
            attack,
            defense,
            sp_attack,
            sp_defense,
            speed,
        }
    }

    pub const fn get(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpAttack => self.sp_attack,
            StatKind::SpDefense => self.sp_defense,
            StatKind::Speed => self.speed,
        }
    }
}

/// A move in a loadout together with its use budget for this battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveSlot {
    pub move_id: MoveId,
    /// Uses available at battle start. Spent uses are tracked per battle.
    pub uses: u32,
}

impl MoveSlot {
    pub const fn new(move_id: MoveId, uses: u32) -> Self {
        Self { move_id, uses }
    }
}

/// Flat percentage bonus from held equipment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeldBonus {
    pub stat: StatKind,
    pub percent: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub species: SpeciesId,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub stats: Stats,
    pub element: Element,
    pub traits: Vec<TraitId>,
    pub moves: ArrayVec<MoveSlot, { BattleConfig::MAX_MOVES }>,
    pub held_bonuses: Vec<HeldBonus>,
    /// Present only for boss encounters.
    pub boss: Option<BossProfile>,
}

impl Combatant {
    /// Creates a combatant at full HP with an empty loadout.
    pub fn new(
        id: CombatantId,
        name: impl Into<String>,
        species: SpeciesId,
        level: u32,
        max_hp: u32,
        stats: Stats,
        element: Element,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            species,
            level,
            hp: max_hp,
            max_hp,
            stats,
            element,
            traits: Vec::new(),
            moves: ArrayVec::new(),
            held_bonuses: Vec::new(),
            boss: None,
        }
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp;
        self
    }

    /// Appends a move. Moves past the loadout capacity are ignored.
    pub fn with_move(mut self, move_id: MoveId, uses: u32) -> Self {
        let _ = self.moves.try_push(MoveSlot::new(move_id, uses));
        self
    }

    pub fn with_trait(mut self, trait_id: TraitId) -> Self {
        self.traits.push(trait_id);
        self
    }

    pub fn with_held_bonus(mut self, stat: StatKind, percent: i32) -> Self {
        self.held_bonuses.push(HeldBonus { stat, percent });
        self
    }

    pub fn with_boss(mut self, profile: BossProfile) -> Self {
        self.boss = Some(profile);
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    #[inline]
    pub fn is_boss(&self) -> bool {
        self.boss.is_some()
    }

    /// Sum of held-equipment percentages for `stat`.
    pub fn held_percent(&self, stat: StatKind) -> i32 {
        self.held_bonuses
            .iter()
            .filter(|bonus| bonus.stat == stat)
            .map(|bonus| bonus.percent)
            .sum()
    }

    /// Removes up to `amount` HP, flooring at 0. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restores up to `amount` HP, capped at max. Returns the HP actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_hp.saturating_sub(self.hp));
        self.hp += gained;
        gained
    }

    /// `percent` of max HP, at least 1 for a non-zero percent.
    pub fn percent_of_max(&self, percent: u32) -> u32 {
        if percent == 0 {
            return 0;
        }
        ((self.max_hp as u64 * percent as u64 / 100) as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Combatant {
        Combatant::new(
            CombatantId(1),
            "Sample",
            SpeciesId(1),
            10,
            40,
            Stats::new(10, 10, 10, 10, 10),
            Element::Normal,
        )
    }

    #[test]
    fn hp_floors_at_zero() {
        let mut c = sample();
        assert_eq!(c.take_damage(100), 40);
        assert_eq!(c.hp, 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn heal_caps_at_max() {
        let mut c = sample().with_hp(35);
        assert_eq!(c.heal(20), 5);
        assert_eq!(c.hp, 40);
    }

    #[test]
    fn loadout_ignores_fifth_move() {
        let c = (0..5).fold(sample(), |c, i| c.with_move(MoveId(i), 10));
        assert_eq!(c.moves.len(), BattleConfig::MAX_MOVES);
    }
}
