//! Credential store
//!
//! Maps a [`CredentialRef`] onto the API key sent as `X-API-KEY`. Keys are
//! loaded once at startup and never logged.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use tweetshot_domain::{CredentialRef, DEFAULT_CREDENTIAL};

use crate::settings::Settings;

/// Errors from credential lookup and loading.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// No key is stored under the referenced name.
    #[error("no API key configured for credential '{0}'")]
    NotFound(String),

    /// The key file could not be read.
    #[error("failed to read API key file {path}: {source}")]
    Io {
        /// Key file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configured key is blank.
    #[error("API key for credential '{0}' is empty")]
    Empty(String),
}

/// Source of API keys for the transport.
pub trait CredentialStore: Send + Sync {
    /// Returns the API key for the referenced credential.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::NotFound`] if no key is stored under the name.
    fn api_key(&self, credential: &CredentialRef) -> Result<String, CredentialError>;
}

/// In-memory credential store.
#[derive(Clone, Default)]
pub struct StaticCredentialStore {
    keys: HashMap<String, String>,
}

impl StaticCredentialStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `api_key` under `credential`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Empty`] if the key is blank.
    pub fn insert(
        &mut self,
        credential: &CredentialRef,
        api_key: impl Into<String>,
    ) -> Result<(), CredentialError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(CredentialError::Empty(credential.name().to_string()));
        }
        self.keys.insert(credential.name().to_string(), api_key);
        Ok(())
    }

    /// Builds a store holding the default credential from settings.
    ///
    /// `api_key_file` wins over an inline `api_key`. With neither set the
    /// store is empty and lookups fail with [`CredentialError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns an error if the key file cannot be read or the key is blank.
    pub async fn from_settings(settings: &Settings) -> Result<Self, CredentialError> {
        let mut store = Self::new();
        let credential = CredentialRef::new(DEFAULT_CREDENTIAL);

        if let Some(path) = &settings.api_key_file {
            let key = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| CredentialError::Io {
                    path: path.clone(),
                    source,
                })?;
            store.insert(&credential, key)?;
        } else if let Some(key) = &settings.api_key {
            store.insert(&credential, key.clone())?;
        }

        Ok(store)
    }

    /// Returns true if a key is stored under `credential`.
    #[must_use]
    pub fn contains(&self, credential: &CredentialRef) -> bool {
        self.keys.contains_key(credential.name())
    }
}

impl CredentialStore for StaticCredentialStore {
    fn api_key(&self, credential: &CredentialRef) -> Result<String, CredentialError> {
        self.keys
            .get(credential.name())
            .cloned()
            .ok_or_else(|| CredentialError::NotFound(credential.name().to_string()))
    }
}

impl fmt::Debug for StaticCredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentialStore")
            .field("credentials", &self.keys.keys().collect::<Vec<_>>())
            .finish()
    }
}
