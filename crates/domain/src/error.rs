//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while validating screenshot options.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The target post identifier is empty.
    #[error("the tweet ID must not be empty")]
    EmptyTargetId,

    /// The target post identifier is a relative path segment.
    #[error("'{0}' is not a valid tweet ID")]
    InvalidTargetId(String),

    /// An option value is not one of the accepted choices.
    #[error("invalid value '{value}' for '{field}' (expected one of: {expected})")]
    InvalidOption {
        /// Name of the option field.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// Comma separated list of accepted values.
        expected: &'static str,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
