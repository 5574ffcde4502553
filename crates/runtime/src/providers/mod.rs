//! Action selector implementations and a by-name registry for them.
pub mod ai;

use battle_core::{ActionSelector, FirstUsableMove};

pub use ai::{GreedySelector, RandomSelector};

static FIRST_USABLE: FirstUsableMove = FirstUsableMove;
static GREEDY: GreedySelector = GreedySelector;
static RANDOM: RandomSelector = RandomSelector;

/// Built-in selector strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    /// First usable move in loadout order.
    FirstUsable,
    /// Highest expected damage against the default target.
    #[default]
    Greedy,
    /// Uniform among usable moves.
    Random,
}

impl SelectorKind {
    pub fn selector(self) -> &'static dyn ActionSelector {
        match self {
            SelectorKind::FirstUsable => &FIRST_USABLE,
            SelectorKind::Greedy => &GREEDY,
            SelectorKind::Random => &RANDOM,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SelectorKind::FirstUsable => "first-usable",
            SelectorKind::Greedy => "greedy",
            SelectorKind::Random => "random",
        }
    }
}

impl std::fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SelectorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first-usable" | "first" => Ok(SelectorKind::FirstUsable),
            "greedy" => Ok(SelectorKind::Greedy),
            "random" => Ok(SelectorKind::Random),
            other => Err(format!("unknown selector '{other}'")),
        }
    }
}
