//! Action queue ordering.
//!
//! Actions sort by priority, then effective speed, then a tie-break value
//! drawn from the battle's random source when the action was gathered. The
//! gather index settles anything left, which keeps the order total.

use core::cmp::Reverse;

use crate::env::MoveDefinition;
use crate::state::Slot;

/// What a queued action will do once it runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Planned {
    Move {
        mv: MoveDefinition,
        target: Slot,
        /// The desperation move replaced the requested one.
        fallback: bool,
    },
    Swap {
        to: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct QueuedAction {
    pub gather: usize,
    pub actor: Slot,
    pub priority: i32,
    pub speed: u32,
    pub draw: u32,
    pub planned: Planned,
}

impl QueuedAction {
    fn sort_key(&self) -> (Reverse<i32>, Reverse<u32>, Reverse<u32>, usize) {
        (
            Reverse(self.priority),
            Reverse(self.speed),
            Reverse(self.draw),
            self.gather,
        )
    }
}

/// Sorts `queue` into execution order.
pub(crate) fn sort_queue(queue: &mut [QueuedAction]) {
    queue.sort_by_key(QueuedAction::sort_key);
}
