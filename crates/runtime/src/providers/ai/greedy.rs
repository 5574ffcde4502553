use battle_core::{
    ActionSelector, BattleRng, Decision, Effectiveness, MoveDefinition, MoveId, SelectionContext,
};

/// Picks the usable move with the highest expected damage against the
/// default target.
///
/// # Design
///
/// The score is `power × STAB × effectiveness × accuracy`, all in integer
/// percent. Status moves score 0 and are only chosen when nothing scores
/// higher. Ties are broken with one draw from the battle PRNG; a unique best
/// move draws nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GreedySelector;

impl ActionSelector for GreedySelector {
    fn select(&self, ctx: &SelectionContext<'_>, rng: &mut BattleRng) -> Decision {
        let usable = ctx.usable_moves();
        let Some(best) = usable
            .iter()
            .map(|mv| expected_damage_score(ctx, mv))
            .max()
        else {
            return Decision::use_move(MoveId::DESPERATION);
        };

        let ties: Vec<MoveId> = usable
            .iter()
            .filter(|mv| expected_damage_score(ctx, mv) == best)
            .map(|mv| mv.id)
            .collect();
        let pick = ties[rng.pick(ties.len())];

        tracing::trace!(
            actor = %ctx.actor.id,
            ?pick,
            score = best,
            ties = ties.len(),
            "greedy pick"
        );
        Decision::use_move(pick)
    }
}

/// Expected damage of `mv` from the context's actor against its default
/// target, as an unscaled integer score.
pub fn expected_damage_score(ctx: &SelectionContext<'_>, mv: &MoveDefinition) -> u64 {
    if mv.power == 0 {
        return 0;
    }
    let attacker_element = ctx.state.get(ctx.actor.id).element_of(ctx.actor);
    let defender_element = ctx.state.get(ctx.target.id).element_of(ctx.target);

    let stab = if mv.element == attacker_element {
        ctx.params.stab_percent
    } else {
        100
    };
    let effectiveness = match ctx.env.effectiveness(mv.element, defender_element) {
        Effectiveness::Neutral => 100,
        Effectiveness::Super => ctx.params.super_effective_percent,
        Effectiveness::Resisted => ctx.params.resisted_percent,
        Effectiveness::Immune | Effectiveness::Absorb => 0,
    };

    mv.power as u64 * stab as u64 * effectiveness as u64 * mv.accuracy.min(100) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{
        BattleEnv, CombatParams, CombatState, Combatant, CombatantId, Element, MoveCategory,
        MoveTable, Side, SpeciesId, Stats, TypeChart,
    };

    fn special(id: u16, name: &str, element: Element) -> MoveDefinition {
        MoveDefinition::new(MoveId(id), name, element, MoveCategory::Special, 40, 100)
    }

    fn moves() -> MoveTable {
        MoveTable::new()
            .with(special(1, "Ember", Element::Fire))
            .with(special(2, "Splash", Element::Water))
            .with(special(3, "Gust", Element::Air))
            .with(special(4, "Breeze", Element::Air))
    }

    fn creature(id: u32, element: Element, loadout: &[u16]) -> Combatant {
        loadout.iter().fold(
            Combatant::new(
                CombatantId(id),
                "c",
                SpeciesId(1),
                10,
                50,
                Stats::new(20, 20, 20, 20, 20),
                element,
            ),
            |c, &m| c.with_move(MoveId(m), 5),
        )
    }

    fn decide(actor: &Combatant, target: &Combatant, rng: &mut BattleRng) -> Decision {
        let table = moves();
        let chart = TypeChart::standard();
        let env = BattleEnv::empty().with_moves(&table).with_tables(&chart);
        let params = CombatParams::default();
        let mut state = CombatState::new();
        state.initialize(actor.id);
        state.initialize(target.id);
        let team = std::slice::from_ref(actor);
        let opponents = std::slice::from_ref(target);
        let ctx = SelectionContext {
            actor,
            side: Side::Player,
            target,
            team,
            opponents,
            state: &state,
            env: &env,
            params: &params,
        };
        GreedySelector.select(&ctx, rng)
    }

    #[test]
    fn prefers_super_effective_over_stab() {
        let actor = creature(1, Element::Fire, &[1, 2]);
        let target = creature(2, Element::Fire, &[]);
        let mut rng = BattleRng::new(1);

        assert_eq!(decide(&actor, &target, &mut rng), Decision::use_move(MoveId(2)));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn ties_draw_once_from_the_battle_rng() {
        let actor = creature(1, Element::Normal, &[3, 4]);
        let target = creature(2, Element::Normal, &[]);
        let mut rng = BattleRng::new(9);

        let choice = decide(&actor, &target, &mut rng);
        assert!(matches!(
            choice,
            Decision::UseMove { move_id: MoveId(3) | MoveId(4), .. }
        ));
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn spent_loadout_falls_back_to_desperation() {
        let actor = creature(1, Element::Normal, &[]);
        let target = creature(2, Element::Normal, &[]);
        let mut rng = BattleRng::new(3);

        assert_eq!(
            decide(&actor, &target, &mut rng),
            Decision::use_move(MoveId::DESPERATION)
        );
    }
}
