use super::tables::Element;
use super::traits::TraitId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeciesId(pub u16);

/// Rarity tier, read by external reward calculators.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Static species data.
///
/// Innate traits apply to every combatant of the species in addition to the
/// traits listed on the combatant itself.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeciesDefinition {
    pub id: SpeciesId,
    pub name: String,
    pub affinity: Element,
    #[cfg_attr(feature = "serde", serde(default))]
    pub traits: Vec<TraitId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
}

pub trait SpeciesOracle: Send + Sync {
    fn definition(&self, id: SpeciesId) -> Option<SpeciesDefinition>;
}
