//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A function input was supplied that the definition does not declare.
    #[error("unknown input parameter: {0}")]
    UnknownParameter(String),

    /// A required function input is missing.
    #[error("missing required input parameter: {0}")]
    MissingParameter(String),

    /// A function input has the wrong JSON type.
    #[error("input parameter `{name}` must be of type {expected}")]
    InvalidParameterType {
        /// Parameter name.
        name: String,
        /// Declared type of the parameter.
        expected: String,
    },

    /// Function inputs were not a JSON object.
    #[error("function inputs must be a JSON object")]
    InvalidInputs,
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
