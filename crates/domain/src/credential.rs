//! Credential references
//!
//! The core only ever names a credential. Looking up the secret and putting
//! it on the wire is the transport's job.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the credential used when none is given.
pub const DEFAULT_CREDENTIAL: &str = "twitterShotsApi";

/// Reference to a credential held by the host's credential store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialRef(String);

impl CredentialRef {
    /// Creates a reference to the named credential.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the credential name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for CredentialRef {
    fn default() -> Self {
        Self::new(DEFAULT_CREDENTIAL)
    }
}

impl fmt::Display for CredentialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
