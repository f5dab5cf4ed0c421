//! Application error types

use sf_report_domain::{AuthError, DomainError};
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Obtaining an access token failed.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Function inputs or outputs could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The invocation did not finish within its time limit.
    #[error("operation timed out after {timeout_ms}ms")]
    Timeout {
        /// The limit that was exceeded.
        timeout_ms: u64,
    },

    /// The invocation was cancelled before it finished.
    #[error("operation cancelled")]
    Cancelled,
}

impl From<serde_json::Error> for ApplicationError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
