//! HTTP transport port

use async_trait::async_trait;
use thiserror::Error;
use tweetshot_domain::{CredentialRef, OutboundRequest, RemoteResponse};

/// Errors reported by a transport.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body or the reason phrase.
        message: String,
    },

    /// The request timed out.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The referenced credential could not be loaded.
    #[error("credential '{0}' is not available")]
    Credential(String),

    /// The request URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Returns the HTTP status, if the failure came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Port for executing outbound requests.
///
/// The transport owns authentication: it looks up the referenced
/// credential and signs the request. It also owns timeouts and any retry
/// policy. The body of the returned response is text or bytes according to
/// [`OutboundRequest::body_encoding`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes the request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Status`] for non-2xx responses and another
    /// variant for network or credential failures.
    async fn execute(
        &self,
        request: &OutboundRequest,
        credential: &CredentialRef,
    ) -> Result<RemoteResponse, TransportError>;
}
