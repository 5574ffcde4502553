//! Elemental affinities and the type-effectiveness table.

use std::collections::BTreeMap;

/// Elemental affinity of a creature or a move.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Element {
    #[default]
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Earth,
    Air,
    Metal,
    Light,
    Shadow,
    Toxic,
}

/// How a move's element interacts with a defender's affinity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Effectiveness {
    #[default]
    Neutral,
    Super,
    Resisted,
    /// Damage is forced to 0.
    Immune,
    /// The defender is healed instead of damaged.
    Absorb,
}

/// Read-only lookup of elemental matchups.
pub trait TablesOracle: Send + Sync {
    fn effectiveness(&self, attack: Element, defend: Element) -> Effectiveness;
}

/// One non-neutral entry of a type chart, as authored in content files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchupRow {
    pub attack: Element,
    pub defend: Element,
    pub effectiveness: Effectiveness,
}

/// In-memory type chart. Pairs not listed are neutral.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeChart {
    entries: BTreeMap<(Element, Element), Effectiveness>,
}

impl TypeChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, attack: Element, defend: Element, effectiveness: Effectiveness) {
        if effectiveness == Effectiveness::Neutral {
            self.entries.remove(&(attack, defend));
        } else {
            self.entries.insert((attack, defend), effectiveness);
        }
    }

    pub fn with(mut self, attack: Element, defend: Element, effectiveness: Effectiveness) -> Self {
        self.set(attack, defend, effectiveness);
        self
    }

    pub fn from_rows(rows: impl IntoIterator<Item = MatchupRow>) -> Self {
        let mut chart = Self::new();
        for row in rows {
            chart.set(row.attack, row.defend, row.effectiveness);
        }
        chart
    }

    /// Non-neutral entries in a stable order.
    pub fn rows(&self) -> impl Iterator<Item = MatchupRow> + '_ {
        self.entries
            .iter()
            .map(|(&(attack, defend), &effectiveness)| MatchupRow {
                attack,
                defend,
                effectiveness,
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The built-in matchup table.
    pub fn standard() -> Self {
        use Effectiveness::{Absorb, Immune, Resisted, Super};
        use Element::*;

        const ROWS: &[(Element, Element, Effectiveness)] = &[
            (Fire, Grass, Super),
            (Fire, Ice, Super),
            (Fire, Metal, Super),
            (Fire, Water, Resisted),
            (Fire, Fire, Resisted),
            (Water, Fire, Super),
            (Water, Earth, Super),
            (Water, Grass, Resisted),
            (Water, Water, Resisted),
            (Grass, Water, Super),
            (Grass, Earth, Super),
            (Grass, Fire, Resisted),
            (Grass, Air, Resisted),
            (Electric, Water, Super),
            (Electric, Air, Super),
            (Electric, Earth, Immune),
            (Electric, Grass, Resisted),
            (Ice, Grass, Super),
            (Ice, Air, Super),
            (Ice, Fire, Resisted),
            (Ice, Metal, Resisted),
            (Earth, Fire, Super),
            (Earth, Electric, Super),
            (Earth, Metal, Super),
            (Earth, Air, Immune),
            (Air, Grass, Super),
            (Air, Electric, Resisted),
            (Metal, Ice, Super),
            (Metal, Metal, Resisted),
            (Light, Shadow, Super),
            (Light, Light, Resisted),
            (Shadow, Light, Super),
            (Shadow, Normal, Immune),
            (Normal, Shadow, Immune),
            (Normal, Metal, Resisted),
            (Toxic, Grass, Super),
            (Toxic, Metal, Immune),
            (Toxic, Toxic, Absorb),
        ];

        let mut chart = Self::new();
        for &(attack, defend, effectiveness) in ROWS {
            chart.set(attack, defend, effectiveness);
        }
        chart
    }
}

impl TablesOracle for TypeChart {
    fn effectiveness(&self, attack: Element, defend: Element) -> Effectiveness {
        self.entries
            .get(&(attack, defend))
            .copied()
            .unwrap_or_default()
    }
}
