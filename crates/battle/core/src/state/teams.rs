//! The two rosters taking part in a battle.

use super::combatant::{Combatant, CombatantId, Side};

/// Location of a combatant: its side and roster index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub side: Side,
    pub index: usize,
}

impl Slot {
    pub const fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }
}

/// Both rosters, indexed by [`Side`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Teams {
    sides: [Vec<Combatant>; 2],
}

impl Teams {
    pub fn new(player: Vec<Combatant>, opponent: Vec<Combatant>) -> Self {
        Self {
            sides: [player, opponent],
        }
    }

    pub fn side(&self, side: Side) -> &[Combatant] {
        &self.sides[side.index()]
    }

    pub fn get(&self, slot: Slot) -> Option<&Combatant> {
        self.sides[slot.side.index()].get(slot.index)
    }

    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut Combatant> {
        self.sides[slot.side.index()].get_mut(slot.index)
    }

    pub fn find(&self, id: CombatantId) -> Option<Slot> {
        Side::BOTH.into_iter().find_map(|side| {
            self.side(side)
                .iter()
                .position(|c| c.id == id)
                .map(|index| Slot::new(side, index))
        })
    }

    pub fn is_alive(&self, slot: Slot) -> bool {
        self.get(slot).is_some_and(Combatant::is_alive)
    }

    /// Living members of `side` in roster order.
    pub fn living(&self, side: Side) -> impl Iterator<Item = (usize, &Combatant)> {
        self.side(side)
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
    }

    pub fn living_count(&self, side: Side) -> usize {
        self.living(side).count()
    }

    pub fn first_living(&self, side: Side) -> Option<usize> {
        self.living(side).map(|(index, _)| index).next()
    }

    pub fn is_wiped(&self, side: Side) -> bool {
        self.living_count(side) == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Combatant)> {
        Side::BOTH.into_iter().flat_map(move |side| {
            self.side(side)
                .iter()
                .enumerate()
                .map(move |(index, c)| (Slot::new(side, index), c))
        })
    }

    pub fn into_sides(self) -> (Vec<Combatant>, Vec<Combatant>) {
        let [player, opponent] = self.sides;
        (player, opponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Element, SpeciesId};
    use crate::state::Stats;

    fn member(id: u32, hp: u32) -> Combatant {
        Combatant::new(
            CombatantId(id),
            format!("m{id}"),
            SpeciesId(1),
            5,
            20,
            Stats::new(5, 5, 5, 5, 5),
            Element::Normal,
        )
        .with_hp(hp)
    }

    #[test]
    fn living_skips_fainted() {
        let teams = Teams::new(vec![member(1, 0), member(2, 10)], vec![member(3, 5)]);
        assert_eq!(teams.first_living(Side::Player), Some(1));
        assert_eq!(teams.living_count(Side::Player), 1);
        assert_eq!(teams.find(CombatantId(3)), Some(Slot::new(Side::Opponent, 0)));
    }

    #[test]
    fn wiped_when_no_living_members() {
        let teams = Teams::new(vec![member(1, 0)], vec![member(2, 1)]);
        assert!(teams.is_wiped(Side::Player));
        assert!(!teams.is_wiped(Side::Opponent));
    }
}
