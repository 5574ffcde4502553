//! Unified error types surfaced by the runtime API.
//!
//! Wraps setup and turn failures from the simulator together with content
//! and replay failures so clients can bubble them up with consistent context.
use battle_core::{ErrorSeverity, GameError, SetupError, TurnError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to load battle content: {0}")]
    Content(String),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error("replay diverged at record {index}: expected root {expected}, got {actual}")]
    ReplayDiverged {
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("replay records match but summaries differ")]
    SummaryMismatch,
}

impl RuntimeError {
    /// Severity of the wrapped simulator error. Content and replay failures
    /// need new input and count as validation errors.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Setup(err) => err.severity(),
            RuntimeError::Turn(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Content(_) => "RUNTIME_CONTENT",
            RuntimeError::Setup(err) => err.error_code(),
            RuntimeError::Turn(err) => err.error_code(),
            RuntimeError::ReplayDiverged { .. } => "RUNTIME_REPLAY_DIVERGED",
            RuntimeError::SummaryMismatch => "RUNTIME_SUMMARY_MISMATCH",
        }
    }

    /// Whether the caller can retry with a different input.
    pub fn is_recoverable(&self) -> bool {
        self.severity().is_recoverable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::Side;

    #[test]
    fn severity_follows_wrapped_error() {
        let input = RuntimeError::from(TurnError::InputRequired { side: Side::Player });
        assert!(input.is_recoverable());
        assert_eq!(input.error_code(), "TURN_INPUT_REQUIRED");

        let finished = RuntimeError::from(TurnError::BattleFinished);
        assert_eq!(finished.severity(), ErrorSeverity::Fatal);
        assert!(!finished.is_recoverable());

        let setup = RuntimeError::from(SetupError::EmptyTeam { side: Side::Opponent });
        assert_eq!(setup.severity(), ErrorSeverity::Validation);
        assert_eq!(setup.error_code(), "SETUP_EMPTY_TEAM");

        assert!(!RuntimeError::Content("missing".into()).is_recoverable());
    }
}
