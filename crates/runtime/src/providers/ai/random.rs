use battle_core::{ActionSelector, BattleRng, Decision, MoveId, SelectionContext};

/// Picks uniformly among usable moves with one draw from the battle PRNG.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RandomSelector;

impl ActionSelector for RandomSelector {
    fn select(&self, ctx: &SelectionContext<'_>, rng: &mut BattleRng) -> Decision {
        let usable = ctx.usable_moves();
        if usable.is_empty() {
            return Decision::use_move(MoveId::DESPERATION);
        }
        Decision::use_move(usable[rng.pick(usable.len())].id)
    }
}
