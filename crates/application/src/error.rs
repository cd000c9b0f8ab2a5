//! Application error types

use thiserror::Error;
use tweetshot_domain::DomainError;

use crate::ports::{ParameterError, TransportError};

/// An option was missing or invalid. Never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// An option value failed domain validation.
    #[error(transparent)]
    Option(#[from] DomainError),

    /// A parameter could not be resolved.
    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

/// Failure while processing a single item.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessError {
    /// The item's options were missing or invalid.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The transport failed.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// The body does not match the negotiated response shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<DomainError> for ProcessError {
    fn from(error: DomainError) -> Self {
        Self::Validation(error.into())
    }
}

impl From<ParameterError> for ProcessError {
    fn from(error: ParameterError) -> Self {
        Self::Validation(error.into())
    }
}

/// A batch aborted because an item failed while continue-on-error was off.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("item {item_index} failed: {source}")]
pub struct BatchError {
    /// Index of the item that failed.
    pub item_index: usize,
    /// Why it failed.
    #[source]
    pub source: ProcessError,
}

/// Result type alias for per-item processing.
pub type ProcessResult<T> = Result<T, ProcessError>;
