//! In-memory oracle implementations.
//!
//! Content loaders fill these tables from data files; tests build them
//! directly. Each one is a plain map keyed by id.

use std::collections::BTreeMap;

use super::{
    MoveDefinition, MoveId, MoveOracle, SpeciesDefinition, SpeciesId, SpeciesOracle,
    TraitDefinition, TraitId, TraitOracle,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveTable {
    moves: BTreeMap<MoveId, MoveDefinition>,
}

impl MoveTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: MoveDefinition) -> Option<MoveDefinition> {
        self.moves.insert(definition.id, definition)
    }

    pub fn with(mut self, definition: MoveDefinition) -> Self {
        self.insert(definition);
        self
    }

    pub fn get(&self, id: MoveId) -> Option<&MoveDefinition> {
        self.moves.get(&id)
    }

    /// Looks a move up by name, ignoring ASCII case.
    pub fn find_by_name(&self, name: &str) -> Option<&MoveDefinition> {
        self.moves
            .values()
            .find(|definition| definition.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveDefinition> {
        self.moves.values()
    }
}

impl FromIterator<MoveDefinition> for MoveTable {
    fn from_iter<I: IntoIterator<Item = MoveDefinition>>(iter: I) -> Self {
        let mut table = Self::new();
        for definition in iter {
            table.insert(definition);
        }
        table
    }
}

impl MoveOracle for MoveTable {
    fn definition(&self, id: MoveId) -> Option<MoveDefinition> {
        self.moves.get(&id).cloned()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraitTable {
    traits: BTreeMap<TraitId, TraitDefinition>,
}

impl TraitTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: TraitDefinition) -> Option<TraitDefinition> {
        self.traits.insert(definition.id, definition)
    }

    pub fn with(mut self, definition: TraitDefinition) -> Self {
        self.insert(definition);
        self
    }

    pub fn get(&self, id: TraitId) -> Option<&TraitDefinition> {
        self.traits.get(&id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&TraitDefinition> {
        self.traits
            .values()
            .find(|definition| definition.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.traits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraitDefinition> {
        self.traits.values()
    }
}

impl FromIterator<TraitDefinition> for TraitTable {
    fn from_iter<I: IntoIterator<Item = TraitDefinition>>(iter: I) -> Self {
        let mut table = Self::new();
        for definition in iter {
            table.insert(definition);
        }
        table
    }
}

impl TraitOracle for TraitTable {
    fn definition(&self, id: TraitId) -> Option<TraitDefinition> {
        self.traits.get(&id).cloned()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpeciesTable {
    species: BTreeMap<SpeciesId, SpeciesDefinition>,
}

impl SpeciesTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: SpeciesDefinition) -> Option<SpeciesDefinition> {
        self.species.insert(definition.id, definition)
    }

    pub fn with(mut self, definition: SpeciesDefinition) -> Self {
        self.insert(definition);
        self
    }

    pub fn get(&self, id: SpeciesId) -> Option<&SpeciesDefinition> {
        self.species.get(&id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&SpeciesDefinition> {
        self.species
            .values()
            .find(|definition| definition.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeciesDefinition> {
        self.species.values()
    }
}

impl FromIterator<SpeciesDefinition> for SpeciesTable {
    fn from_iter<I: IntoIterator<Item = SpeciesDefinition>>(iter: I) -> Self {
        let mut table = Self::new();
        for definition in iter {
            table.insert(definition);
        }
        table
    }
}

impl SpeciesOracle for SpeciesTable {
    fn definition(&self, id: SpeciesId) -> Option<SpeciesDefinition> {
        self.species.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Element, MoveCategory};

    #[test]
    fn move_lookup_by_id_and_name() {
        let table: MoveTable = [MoveDefinition::new(
            MoveId(7),
            "Ember",
            Element::Fire,
            MoveCategory::Special,
            40,
            100,
        )]
        .into_iter()
        .collect();

        assert!(MoveOracle::definition(&table, MoveId(7)).is_some());
        assert!(MoveOracle::definition(&table, MoveId(8)).is_none());
        assert_eq!(table.find_by_name("ember").map(|m| m.id), Some(MoveId(7)));
    }
}
