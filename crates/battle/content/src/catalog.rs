//! The full set of static lookups a battle reads.

use battle_core::{
    BattleEnv, MoveDefinition, MoveTable, SpeciesDefinition, SpeciesTable, TraitDefinition,
    TraitTable, TypeChart,
};

/// Moves, traits, species and the type chart, loaded once and shared by
/// every battle.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub moves: MoveTable,
    pub traits: TraitTable,
    pub species: SpeciesTable,
    pub chart: TypeChart,
}

impl Catalog {
    pub fn new(
        moves: impl IntoIterator<Item = MoveDefinition>,
        traits: impl IntoIterator<Item = TraitDefinition>,
        species: impl IntoIterator<Item = SpeciesDefinition>,
        chart: TypeChart,
    ) -> Self {
        Self {
            moves: moves.into_iter().collect(),
            traits: traits.into_iter().collect(),
            species: species.into_iter().collect(),
            chart,
        }
    }

    /// Environment over this catalog with no damage modifiers.
    pub fn env(&self) -> BattleEnv<'_> {
        BattleEnv::empty()
            .with_moves(&self.moves)
            .with_traits(&self.traits)
            .with_species(&self.species)
            .with_tables(&self.chart)
    }
}
