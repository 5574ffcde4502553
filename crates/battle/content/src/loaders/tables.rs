//! Type chart loader.

use std::path::Path;

use battle_core::{MatchupRow, TypeChart};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Matchup table the authored rows are applied on top of.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartBase {
    /// Every pair starts neutral.
    Empty,
    /// Start from [`TypeChart::standard`].
    #[default]
    Standard,
}

/// Type chart structure for RON files.
///
/// Rows override the base table; a `Neutral` row removes an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeChartSpec {
    #[serde(default)]
    pub base: ChartBase,
    #[serde(default)]
    pub matchups: Vec<MatchupRow>,
}

impl TypeChartSpec {
    pub fn build(&self) -> TypeChart {
        let mut chart = match self.base {
            ChartBase::Empty => TypeChart::new(),
            ChartBase::Standard => TypeChart::standard(),
        };
        for row in &self.matchups {
            chart.set(row.attack, row.defend, row.effectiveness);
        }
        chart
    }
}

/// Loader for the elemental type chart from RON files.
pub struct TypeChartLoader;

impl TypeChartLoader {
    /// Load the type chart from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing TypeChartSpec
    ///
    /// # Returns
    ///
    /// Returns the resolved TypeChart.
    pub fn load(path: &Path) -> LoadResult<TypeChart> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TypeChart> {
        let spec: TypeChartSpec = parse_ron(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse type chart RON: {}", e))?;

        Ok(spec.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{Effectiveness, Element, TablesOracle};

    #[test]
    fn rows_override_the_standard_base() {
        let chart = TypeChartLoader::parse(
            r#"(matchups: [
                (attack: Fire, defend: Grass, effectiveness: Neutral),
                (attack: Normal, defend: Fire, effectiveness: Resisted),
            ])"#,
        )
        .unwrap();

        assert_eq!(
            chart.effectiveness(Element::Fire, Element::Grass),
            Effectiveness::Neutral
        );
        assert_eq!(
            chart.effectiveness(Element::Normal, Element::Fire),
            Effectiveness::Resisted
        );
        assert_eq!(
            chart.effectiveness(Element::Water, Element::Fire),
            Effectiveness::Super
        );
    }

    #[test]
    fn empty_base_starts_neutral() {
        let chart = TypeChartLoader::parse(
            r#"(base: Empty, matchups: [(attack: Ice, defend: Ice, effectiveness: Absorb)])"#,
        )
        .unwrap();
        assert_eq!(chart.len(), 1);
    }
}
