//! Heuristic AI selectors.
//!
//! Both strategies obey the selector contract: they only read the
//! [`SelectionContext`](battle_core::SelectionContext) and draw randomness from
//! the battle's own [`BattleRng`](battle_core::BattleRng), so replays stay
//! exact.
mod greedy;
mod random;

pub use greedy::{GreedySelector, expected_damage_score};
pub use random::RandomSelector;
