//! Tweetshot Infrastructure - Adapters and implementations
//!
//! This crate provides the concrete implementations of the application ports:
//! - `ReqwestTransport`: HTTP transport for the rendering API
//! - `StaticCredentialStore`: API keys loaded from settings
//! - `Settings`: layered configuration (defaults, files, environment)
//! - `verify_credential`: the credential liveness check

pub mod adapters;
pub mod credential_check;
pub mod credentials;
pub mod settings;

pub use adapters::{API_KEY_HEADER, ReqwestTransport};
pub use credential_check::{SAMPLE_STATUS_ID, verify_credential};
pub use credentials::{CredentialError, CredentialStore, StaticCredentialStore};
pub use settings::{DEFAULT_BASE_URL, ENV_PREFIX, Settings, SettingsError};
