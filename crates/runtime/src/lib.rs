//! Host-side orchestration for the deterministic battle simulator.
//!
//! This crate wires static content, AI strategies and logging around
//! `battle-core`. Consumers build an [`OracleManager`] once, then start a
//! [`BattleSession`] per encounter and either drain it or step it turn by
//! turn.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the error types downstream clients interact with
//! - [`oracle`] turns loaded content into battle environments
//! - [`providers`] hosts the AI selector implementations
//! - [`session`] drives battles with tracing instrumentation
//! - [`replay`] computes and verifies record-stream digests
pub mod api;
pub mod oracle;
pub mod providers;
pub mod replay;
pub mod session;

pub use api::{Result, RuntimeError};
pub use oracle::OracleManager;
pub use providers::{GreedySelector, RandomSelector, SelectorKind};
pub use replay::{ReplayDigest, verify_replay, verify_reports};
pub use session::{BattleSession, random_seed};
