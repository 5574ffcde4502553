//! Read-only lookups the simulator consults.
//!
//! Oracles expose move, trait and species definitions, the type chart and the
//! injected damage modifiers. [`BattleEnv`] bundles them as optional
//! references: a missing oracle never fails a lookup, it yields the neutral
//! default (no definition, neutral matchup, no bonus).
mod modifiers;
mod moves;
mod rng;
mod snapshot;
mod species;
mod tables;
mod traits;

pub use modifiers::{BossContext, DamageModifierProvider, FlatModifiers, NoModifiers};
pub use moves::{
    EffectPayload, EffectTarget, MoveCategory, MoveDefinition, MoveEffect, MoveId, MoveOracle,
};
pub use rng::{BattleRng, PcgRng, RngOracle, compute_seed};
pub use snapshot::{MoveTable, SpeciesTable, TraitTable};
pub use species::{Rarity, SpeciesDefinition, SpeciesId, SpeciesOracle};
pub use tables::{Effectiveness, Element, MatchupRow, TablesOracle, TypeChart};
pub use traits::{
    SwitchOutHook, TraitCondition, TraitDefinition, TraitEffect, TraitId, TraitOracle, TraitRule,
};

use crate::state::Combatant;

static NO_MODIFIERS: NoModifiers = NoModifiers;

/// Aggregates the read-only oracles a battle needs.
#[derive(Clone, Copy, Default)]
pub struct BattleEnv<'a> {
    moves: Option<&'a dyn MoveOracle>,
    traits: Option<&'a dyn TraitOracle>,
    species: Option<&'a dyn SpeciesOracle>,
    tables: Option<&'a dyn TablesOracle>,
    modifiers: Option<&'a dyn DamageModifierProvider>,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        moves: Option<&'a dyn MoveOracle>,
        traits: Option<&'a dyn TraitOracle>,
        species: Option<&'a dyn SpeciesOracle>,
        tables: Option<&'a dyn TablesOracle>,
        modifiers: Option<&'a dyn DamageModifierProvider>,
    ) -> Self {
        Self {
            moves,
            traits,
            species,
            tables,
            modifiers,
        }
    }

    /// An environment with no oracles: every lookup is neutral.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_moves(mut self, moves: &'a dyn MoveOracle) -> Self {
        self.moves = Some(moves);
        self
    }

    pub fn with_traits(mut self, traits: &'a dyn TraitOracle) -> Self {
        self.traits = Some(traits);
        self
    }

    pub fn with_species(mut self, species: &'a dyn SpeciesOracle) -> Self {
        self.species = Some(species);
        self
    }

    pub fn with_tables(mut self, tables: &'a dyn TablesOracle) -> Self {
        self.tables = Some(tables);
        self
    }

    pub fn with_modifiers(mut self, modifiers: &'a dyn DamageModifierProvider) -> Self {
        self.modifiers = Some(modifiers);
        self
    }

    pub fn move_definition(&self, id: MoveId) -> Option<MoveDefinition> {
        self.moves.and_then(|oracle| oracle.definition(id))
    }

    pub fn trait_definition(&self, id: TraitId) -> Option<TraitDefinition> {
        self.traits.and_then(|oracle| oracle.definition(id))
    }

    pub fn species(&self, id: SpeciesId) -> Option<SpeciesDefinition> {
        self.species.and_then(|oracle| oracle.definition(id))
    }

    /// Matchup of an attacking element against a defending affinity.
    pub fn effectiveness(&self, attack: Element, defend: Element) -> Effectiveness {
        self.tables
            .map(|oracle| oracle.effectiveness(attack, defend))
            .unwrap_or_default()
    }

    pub fn modifiers(&self) -> &'a dyn DamageModifierProvider {
        self.modifiers.unwrap_or(&NO_MODIFIERS)
    }

    /// Resolved traits of a combatant: its own list followed by its species'
    /// innate traits. Unknown ids are skipped and duplicates count once.
    pub fn traits_of(&self, combatant: &Combatant) -> Vec<TraitDefinition> {
        let innate = self
            .species(combatant.species)
            .map(|species| species.traits)
            .unwrap_or_default();

        let mut seen = Vec::new();
        let mut resolved = Vec::new();
        for id in combatant.traits.iter().chain(innate.iter()) {
            if seen.contains(id) {
                continue;
            }
            seen.push(*id);
            if let Some(definition) = self.trait_definition(*id) {
                resolved.push(definition);
            }
        }
        resolved
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv")
            .field("moves", &self.moves.is_some())
            .field("traits", &self.traits.is_some())
            .field("species", &self.species.is_some())
            .field("tables", &self.tables.is_some())
            .field("modifiers", &self.modifiers.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CombatantId, Stats};

    #[test]
    fn empty_env_is_neutral() {
        let env = BattleEnv::empty();
        assert!(env.move_definition(MoveId(1)).is_none());
        assert_eq!(
            env.effectiveness(Element::Electric, Element::Earth),
            Effectiveness::Neutral
        );
    }

    #[test]
    fn traits_merge_species_innates_once() {
        let traits = TraitTable::new()
            .with(TraitDefinition::new(TraitId(1), "Sturdy"))
            .with(TraitDefinition::new(TraitId(2), "Blaze"));
        let species = SpeciesTable::new().with(SpeciesDefinition {
            id: SpeciesId(5),
            name: "Emberling".into(),
            affinity: Element::Fire,
            traits: vec![TraitId(2), TraitId(1)],
            rarity: Rarity::Rare,
        });
        let env = BattleEnv::empty()
            .with_traits(&traits)
            .with_species(&species);

        let combatant = Combatant::new(
            CombatantId(1),
            "e",
            SpeciesId(5),
            5,
            20,
            Stats::default(),
            Element::Fire,
        )
        .with_trait(TraitId(2))
        .with_trait(TraitId(99));

        let ids: Vec<TraitId> = env.traits_of(&combatant).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TraitId(2), TraitId(1)]);
    }
}
