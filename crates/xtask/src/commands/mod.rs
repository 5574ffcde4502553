//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod list_content;
mod simulate;
mod verify_replay;

pub use list_content::ListContent;
pub use simulate::Simulate;
pub use verify_replay::VerifyReplay;
