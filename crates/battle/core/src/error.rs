//! Common error infrastructure for battle-core.
//!
//! Combat resolution itself never fails: missing lookups degrade to neutral
//! defaults and an emptied team is a terminal condition, not an error. The
//! errors defined in this crate cover battle-start validation and misuse of the
//! incremental stepping protocol.

/// How a caller should react to a rejected battle request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Step again with different input, e.g. a swap to a fainted teammate or
    /// a missing manual decision.
    Recoverable,

    /// The rosters or request are malformed and must be rebuilt.
    Validation,

    /// The battle is over; nothing further can be submitted.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Shared classification for setup and stepping errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs and clients, e.g. `TURN_INPUT_REQUIRED`.
    fn error_code(&self) -> &'static str;
}
