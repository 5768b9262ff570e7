//! Error types for worklock.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for worklock operations.
///
/// Each variant maps to a specific exit code. The boolean `start()`/`kill()`
/// guard API collapses all of these to `false`; the CLI surfaces them with
/// distinct exit codes.
#[derive(Error, Debug)]
pub enum WorklockError {
    /// User provided invalid arguments or an invalid request.
    #[error("{0}")]
    UserError(String),

    /// A live owner already holds the registration for this marker.
    #[error("another worker is already registered (pid {0})")]
    AlreadyRunning(u32),

    /// `kill` found no live owner recorded in the marker.
    #[error("no live worker is registered; nothing to kill")]
    NothingToKill,

    /// Marker file missing, unopenable, unreadable, or unwritable.
    #[error("marker file unavailable: {0}")]
    Marker(String),

    /// Advisory lock on the marker file could not be acquired.
    #[error("lock acquisition failed: {0}")]
    Lock(String),
}

impl WorklockError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            WorklockError::UserError(_) => exit_codes::USER_ERROR,
            WorklockError::AlreadyRunning(_) => exit_codes::REJECTED,
            WorklockError::NothingToKill => exit_codes::REJECTED,
            WorklockError::Marker(_) => exit_codes::MARKER_FAILURE,
            WorklockError::Lock(_) => exit_codes::LOCK_FAILURE,
        }
    }
}

/// Result type alias for worklock operations.
pub type Result<T> = std::result::Result<T, WorklockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = WorklockError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn already_running_has_correct_exit_code() {
        let err = WorklockError::AlreadyRunning(4242);
        assert_eq!(err.exit_code(), exit_codes::REJECTED);
    }

    #[test]
    fn nothing_to_kill_has_correct_exit_code() {
        let err = WorklockError::NothingToKill;
        assert_eq!(err.exit_code(), exit_codes::REJECTED);
    }

    #[test]
    fn marker_error_has_correct_exit_code() {
        let err = WorklockError::Marker("missing file".to_string());
        assert_eq!(err.exit_code(), exit_codes::MARKER_FAILURE);
    }

    #[test]
    fn lock_error_has_correct_exit_code() {
        let err = WorklockError::Lock("timed out".to_string());
        assert_eq!(err.exit_code(), exit_codes::LOCK_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = WorklockError::AlreadyRunning(17);
        assert_eq!(
            err.to_string(),
            "another worker is already registered (pid 17)"
        );

        let err = WorklockError::Marker("no such file".to_string());
        assert_eq!(err.to_string(), "marker file unavailable: no such file");
    }
}
