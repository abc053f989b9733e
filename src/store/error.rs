//! Store error definitions.

use thiserror::Error;

/// Errors that can occur while talking to the external store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Store unreachable, connection refused or dropped, or timed out.
    #[error("store connection error: {0}")]
    Connection(String),

    /// The store rejected the command (wrong type, auth, script error).
    #[error("store command error: {0}")]
    Command(String),

    /// The store answered with a value we cannot interpret.
    #[error("unexpected store response: {0}")]
    Protocol(String),
}

impl StoreError {
    /// Whether the failure is transient and the call may be retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Connection(_))
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Connection(_) => "connection",
            StoreError::Command(_) => "command",
            StoreError::Protocol(_) => "protocol",
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
