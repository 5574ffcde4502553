//! Encounter roster loader.
//!
//! Roster files name moves, traits and species by their catalog names. They
//! are resolved against a [`Catalog`] into ready-to-battle [`Combatant`]s.

use std::path::Path;

use battle_core::{
    BattleConfig, BattleSetup, BossProfile, Combatant, CombatantId, Element, HeldBonus, Stats,
    Topology,
};
use serde::{Deserialize, Serialize};

use crate::Catalog;
use crate::loaders::{LoadResult, parse_ron, read_file};

/// One loadout entry. `uses` defaults to the move's `max_uses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSlotSpec {
    pub name: String,
    #[serde(default)]
    pub uses: Option<u32>,
}

/// A combatant as authored in a roster file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSpec {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    pub species: String,
    pub level: u32,
    pub max_hp: u32,
    /// Starting HP; full health when absent.
    #[serde(default)]
    pub hp: Option<u32>,
    pub stats: Stats,
    /// Defaults to the species affinity.
    #[serde(default)]
    pub element: Option<Element>,
    #[serde(default)]
    pub traits: Vec<String>,
    pub moves: Vec<MoveSlotSpec>,
    #[serde(default)]
    pub held_bonuses: Vec<HeldBonus>,
    #[serde(default)]
    pub boss: Option<BossProfile>,
}

impl CombatantSpec {
    /// Resolves catalog names into a [`Combatant`].
    ///
    /// # Errors
    ///
    /// Fails on an unknown species, trait or move name, or on a loadout
    /// larger than [`BattleConfig::MAX_MOVES`].
    pub fn resolve(&self, catalog: &Catalog) -> LoadResult<Combatant> {
        let species = catalog.species.find_by_name(&self.species).ok_or_else(|| {
            anyhow::anyhow!(
                "Combatant {}: unknown species '{}'",
                self.id,
                self.species
            )
        })?;

        if self.moves.len() > BattleConfig::MAX_MOVES {
            anyhow::bail!(
                "Combatant {}: {} moves exceeds the loadout limit of {}",
                self.id,
                self.moves.len(),
                BattleConfig::MAX_MOVES
            );
        }

        let name = self.name.clone().unwrap_or_else(|| species.name.clone());
        let mut combatant = Combatant::new(
            CombatantId(self.id),
            name,
            species.id,
            self.level,
            self.max_hp,
            self.stats,
            self.element.unwrap_or(species.affinity),
        )
        .with_hp(self.hp.unwrap_or(self.max_hp));

        for trait_name in &self.traits {
            let definition = catalog.traits.find_by_name(trait_name).ok_or_else(|| {
                anyhow::anyhow!("Combatant {}: unknown trait '{}'", self.id, trait_name)
            })?;
            combatant = combatant.with_trait(definition.id);
        }

        for slot in &self.moves {
            let definition = catalog.moves.find_by_name(&slot.name).ok_or_else(|| {
                anyhow::anyhow!("Combatant {}: unknown move '{}'", self.id, slot.name)
            })?;
            combatant = combatant.with_move(definition.id, slot.uses.unwrap_or(definition.max_uses));
        }

        for bonus in &self.held_bonuses {
            combatant = combatant.with_held_bonus(bonus.stat, bonus.percent);
        }
        if let Some(boss) = &self.boss {
            combatant = combatant.with_boss(boss.clone());
        }

        Ok(combatant)
    }
}

/// Roster file structure: both teams plus optional encounter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSpec {
    pub player: Vec<CombatantSpec>,
    pub opponent: Vec<CombatantSpec>,
    #[serde(default)]
    pub topology: Topology,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RosterSpec {
    pub fn resolve(&self, catalog: &Catalog) -> LoadResult<Encounter> {
        let resolve_side = |specs: &[CombatantSpec]| {
            specs
                .iter()
                .map(|spec| spec.resolve(catalog))
                .collect::<LoadResult<Vec<_>>>()
        };

        Ok(Encounter {
            player: resolve_side(&self.player)?,
            opponent: resolve_side(&self.opponent)?,
            topology: self.topology,
            seed: self.seed,
        })
    }
}

/// A resolved encounter, ready to become a [`BattleSetup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encounter {
    pub player: Vec<Combatant>,
    pub opponent: Vec<Combatant>,
    pub topology: Topology,
    pub seed: Option<u64>,
}

impl Encounter {
    /// Builds a setup carrying the encounter's topology and seed, if any.
    pub fn into_setup<'a>(self, config: BattleConfig) -> BattleSetup<'a> {
        let setup = BattleSetup::new(self.player, self.opponent)
            .with_topology(self.topology)
            .with_config(config);
        match self.seed {
            Some(seed) => setup.with_seed(seed),
            None => setup,
        }
    }
}

/// Loader for encounter rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file and resolve it against `catalog`.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a RosterSpec
    /// * `catalog` - Moves, traits and species the roster refers to by name
    ///
    /// # Returns
    ///
    /// Returns the resolved Encounter.
    pub fn load(path: &Path, catalog: &Catalog) -> LoadResult<Encounter> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
            .map_err(|e| anyhow::anyhow!("Roster {}: {}", path.display(), e))
    }

    pub fn parse(content: &str, catalog: &Catalog) -> LoadResult<Encounter> {
        let spec: RosterSpec = parse_ron(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        spec.resolve(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{
        MoveCategory, MoveDefinition, MoveId, Rarity, Side, SpeciesDefinition, SpeciesId,
        TraitDefinition, TraitId, TypeChart,
    };

    fn catalog() -> Catalog {
        Catalog::new(
            [
                MoveDefinition::new(MoveId(1), "Tackle", Element::Normal, MoveCategory::Physical, 40, 100)
                    .with_max_uses(35),
            ],
            [TraitDefinition::new(TraitId(4), "Sturdy")],
            [SpeciesDefinition {
                id: SpeciesId(2),
                name: "Pebblet".into(),
                affinity: Element::Earth,
                traits: vec![],
                rarity: Rarity::Common,
            }],
            TypeChart::standard(),
        )
    }

    const ROSTER: &str = r#"(
        player: [
            (
                id: 1,
                species: "Pebblet",
                level: 12,
                max_hp: 40,
                stats: (attack: 20, defense: 25, sp_attack: 10, sp_defense: 15, speed: 8),
                traits: ["sturdy"],
                moves: [(name: "Tackle"), (name: "tackle", uses: Some(3))],
            ),
        ],
        opponent: [
            (
                id: 2,
                name: Some("Boulder"),
                species: "Pebblet",
                level: 14,
                max_hp: 50,
                hp: Some(20),
                stats: (attack: 22, defense: 30, sp_attack: 10, sp_defense: 15, speed: 6),
                element: Some(Metal),
                moves: [(name: "Tackle")],
            ),
        ],
        topology: Horde(lone: Player),
        seed: Some(42),
    )"#;

    #[test]
    fn resolves_names_and_defaults() {
        let encounter = RosterLoader::parse(ROSTER, &catalog()).unwrap();

        let player = &encounter.player[0];
        assert_eq!(player.name, "Pebblet");
        assert_eq!(player.hp, 40);
        assert_eq!(player.element, Element::Earth);
        assert_eq!(player.traits, vec![TraitId(4)]);
        assert_eq!(player.moves[0].uses, 35);
        assert_eq!(player.moves[1].uses, 3);

        let opponent = &encounter.opponent[0];
        assert_eq!(opponent.name, "Boulder");
        assert_eq!(opponent.hp, 20);
        assert_eq!(opponent.element, Element::Metal);

        assert_eq!(encounter.topology, Topology::Horde { lone: Side::Player });
        assert_eq!(encounter.seed, Some(42));
    }

    #[test]
    fn unknown_move_names_the_combatant() {
        let roster = ROSTER.replace("(name: \"Tackle\")]", "(name: \"Hyper Beam\")]");
        let err = RosterLoader::parse(&roster, &catalog()).unwrap_err();
        assert!(err.to_string().contains("unknown move 'Hyper Beam'"), "{err}");
    }
}
