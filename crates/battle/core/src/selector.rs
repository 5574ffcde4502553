//! Action selection contract.
//!
//! The orchestrator asks an [`ActionSelector`] for one [`Decision`] per
//! participant that is not controlled manually. Selectors must be pure
//! functions of the context and the battle's random source; any randomness
//! they need comes from the [`BattleRng`] handed to them, so replays stay
//! exact.

use crate::config::CombatParams;
use crate::env::{BattleEnv, BattleRng, MoveDefinition, MoveId};
use crate::state::{Combatant, CombatState, CombatantId, Side};

/// What a participant does this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    /// Use a move from the loadout. `target` picks an opponent in horde
    /// battles; `None` means the default target.
    UseMove {
        move_id: MoveId,
        target: Option<CombatantId>,
    },
    /// Swap the active combatant for the teammate at roster index `to`.
    Swap { to: usize },
}

impl Decision {
    pub const fn use_move(move_id: MoveId) -> Self {
        Decision::UseMove {
            move_id,
            target: None,
        }
    }
}

/// Read-only view handed to a selector.
#[derive(Clone, Copy)]
pub struct SelectionContext<'c> {
    pub actor: &'c Combatant,
    pub side: Side,
    /// Default target: the opposing active, or the lowest-index living
    /// opponent in a horde.
    pub target: &'c Combatant,
    /// The actor's full roster, fainted members included.
    pub team: &'c [Combatant],
    pub opponents: &'c [Combatant],
    pub state: &'c CombatState,
    pub env: &'c BattleEnv<'c>,
    pub params: &'c CombatParams,
}

impl<'c> SelectionContext<'c> {
    /// Loadout moves with uses left and a known definition, in loadout order.
    pub fn usable_moves(&self) -> Vec<MoveDefinition> {
        usable_moves(self.actor, self.state, self.env)
    }
}

/// Moves `combatant` can still use, in loadout order.
pub fn usable_moves(
    combatant: &Combatant,
    state: &CombatState,
    env: &BattleEnv<'_>,
) -> Vec<MoveDefinition> {
    let entry = state.get(combatant.id);
    combatant
        .moves
        .iter()
        .filter(|slot| entry.remaining_uses(slot) > 0)
        .filter_map(|slot| env.move_definition(slot.move_id))
        .collect()
}

/// Strategy that picks an action for a participant.
pub trait ActionSelector {
    fn select(&self, ctx: &SelectionContext<'_>, rng: &mut BattleRng) -> Decision;
}

/// Always uses the first usable move, falling back to the desperation move
/// when the loadout is spent. Never draws from the random source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FirstUsableMove;

impl ActionSelector for FirstUsableMove {
    fn select(&self, ctx: &SelectionContext<'_>, _rng: &mut BattleRng) -> Decision {
        let move_id = ctx
            .usable_moves()
            .first()
            .map(|mv| mv.id)
            .unwrap_or(MoveId::DESPERATION);
        Decision::use_move(move_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Element, MoveCategory, MoveTable, SpeciesId};
    use crate::state::Stats;

    fn table() -> MoveTable {
        MoveTable::new()
            .with(MoveDefinition::new(
                MoveId(1),
                "Jab",
                Element::Normal,
                MoveCategory::Physical,
                40,
                100,
            ))
            .with(MoveDefinition::new(
                MoveId(2),
                "Kick",
                Element::Normal,
                MoveCategory::Physical,
                60,
                95,
            ))
    }

    fn fighter() -> Combatant {
        Combatant::new(
            CombatantId(1),
            "Brawler",
            SpeciesId(1),
            10,
            40,
            Stats::new(20, 20, 20, 20, 20),
            Element::Normal,
        )
        .with_move(MoveId(1), 1)
        .with_move(MoveId(2), 5)
    }

    #[test]
    fn skips_spent_and_unknown_moves() {
        let moves = table();
        let env = BattleEnv::empty().with_moves(&moves);
        let actor = fighter().with_move(MoveId(99), 3);
        let mut state = CombatState::new();

        let ids: Vec<MoveId> = usable_moves(&actor, &state, &env)
            .iter()
            .map(|mv| mv.id)
            .collect();
        assert_eq!(ids, vec![MoveId(1), MoveId(2)]);

        state.get_mut(actor.id).spend_use(MoveId(1));
        let ids: Vec<MoveId> = usable_moves(&actor, &state, &env)
            .iter()
            .map(|mv| mv.id)
            .collect();
        assert_eq!(ids, vec![MoveId(2)]);
    }

    #[test]
    fn first_usable_falls_back_to_desperation() {
        let moves = table();
        let env = BattleEnv::empty().with_moves(&moves);
        let actor = fighter();
        let foe = fighter();
        let mut state = CombatState::new();
        state.get_mut(actor.id).spend_use(MoveId(1));
        for _ in 0..5 {
            state.get_mut(actor.id).spend_use(MoveId(2));
        }
        let params = CombatParams::default();
        let team = vec![actor.clone()];
        let ctx = SelectionContext {
            actor: &actor,
            side: Side::Player,
            target: &foe,
            team: &team,
            opponents: &team,
            state: &state,
            env: &env,
            params: &params,
        };

        let mut rng = BattleRng::new(1);
        assert_eq!(
            FirstUsableMove.select(&ctx, &mut rng),
            Decision::use_move(MoveId::DESPERATION)
        );
        assert_eq!(rng.draws(), 0);
    }
}
