//! Move catalog loader.

use std::path::Path;

use battle_core::{MoveDefinition, MoveId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Move catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveCatalog {
    pub moves: Vec<MoveDefinition>,
}

/// Loader for the move catalog from RON files.
pub struct MoveLoader;

impl MoveLoader {
    /// Load the move catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing MoveCatalog
    ///
    /// # Returns
    ///
    /// Returns a Vec of MoveDefinitions in file order.
    pub fn load(path: &Path) -> LoadResult<Vec<MoveDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a move catalog from RON text.
    ///
    /// Rejects duplicate ids and definitions using the reserved desperation id.
    pub fn parse(content: &str) -> LoadResult<Vec<MoveDefinition>> {
        let catalog: MoveCatalog = parse_ron(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse move catalog RON: {}", e))?;

        let mut seen = Vec::with_capacity(catalog.moves.len());
        for definition in &catalog.moves {
            if definition.id == MoveId::DESPERATION {
                anyhow::bail!(
                    "Move '{}' uses the reserved id {}",
                    definition.name,
                    MoveId::DESPERATION.0
                );
            }
            if seen.contains(&definition.id) {
                anyhow::bail!("Duplicate move id {} ('{}')", definition.id.0, definition.name);
            }
            seen.push(definition.id);
        }

        Ok(catalog.moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{EffectPayload, Element, MoveCategory, StatusKind};

    #[test]
    fn parses_effects_with_defaults() {
        let moves = MoveLoader::parse(
            r#"(
                moves: [
                    (
                        id: 3,
                        name: "Ember",
                        element: Fire,
                        category: Special,
                        power: 40,
                        accuracy: 100,
                        max_uses: 25,
                        effects: [
                            (chance: 10, payload: InflictStatus(status: Burn, turns: None)),
                        ],
                    ),
                ],
            )"#,
        )
        .unwrap();

        let ember = &moves[0];
        assert_eq!(ember.element, Element::Fire);
        assert_eq!(ember.category, MoveCategory::Special);
        assert_eq!(ember.priority, 0);
        assert_eq!(ember.effects[0].chance, 10);
        assert_eq!(
            ember.effects[0].payload,
            EffectPayload::InflictStatus {
                status: StatusKind::Burn,
                turns: None
            }
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = MoveLoader::parse(
            r#"(moves: [
                (id: 1, name: "A", element: Normal, category: Physical, power: 10, accuracy: 100, max_uses: 5),
                (id: 1, name: "B", element: Normal, category: Physical, power: 10, accuracy: 100, max_uses: 5),
            ])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate move id 1"));
    }
}
