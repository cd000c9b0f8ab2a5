//! Parameter resolution port

use serde_json::Value;
use thiserror::Error;

/// Errors raised while resolving a parameter for an item.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParameterError {
    /// A required parameter has no value and no default.
    #[error("missing required parameter '{field}'")]
    Missing {
        /// Parameter name.
        field: String,
    },

    /// The parameter value has the wrong type or shape.
    #[error("invalid parameter '{field}': {reason}")]
    Invalid {
        /// Parameter name.
        field: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A template reference points at a field the item does not have.
    #[error("parameter '{field}' references '{reference}', which the item does not have")]
    Unresolved {
        /// Parameter name.
        field: String,
        /// The unresolved reference.
        reference: String,
    },

    /// The item index is past the end of the batch.
    #[error("no input item at index {index}")]
    NoSuchItem {
        /// The requested index.
        index: usize,
    },
}

/// Port for resolving node parameters per input item.
///
/// Implementations return the value set for `field` on the item at
/// `item_index`, or the field's declared default when it was not set.
pub trait ParameterResolver: Send + Sync {
    /// Resolves one parameter for one item.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Missing`] if a required field has no value,
    /// or another variant if the value cannot be produced.
    fn resolve(&self, item_index: usize, field: &str) -> Result<Value, ParameterError>;
}
