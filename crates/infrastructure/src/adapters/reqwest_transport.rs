//! Screenshot transport using reqwest.
//!
//! This adapter implements the `Transport` port. It resolves request paths
//! against the configured base URL, signs requests with the API key from
//! the credential store, and decodes the body as the request asks.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, warn};
use tweetshot_application::ports::{Transport, TransportError};
use tweetshot_domain::{
    BodyEncoding, CredentialRef, HttpMethod, OutboundRequest, RemoteResponse, ResponseBody,
    StatusCode,
};
use url::Url;

use crate::credentials::CredentialStore;
use crate::settings::{Settings, SettingsError};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Longest error body kept in a status error message, in characters.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Transport talking to the rendering API over HTTP.
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
    timeout: Duration,
    credentials: Arc<dyn CredentialStore>,
}

impl ReqwestTransport {
    /// Creates a transport from settings.
    ///
    /// Default configuration:
    /// - User-Agent: "tweetshot/<version>"
    /// - Follow redirects: up to 10
    /// - Per-request timeout: `settings.timeout_secs`
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client cannot be created.
    pub fn new(
        settings: &Settings,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, SettingsError> {
        let client = Client::builder()
            .user_agent(concat!("tweetshot/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| SettingsError::Invalid {
                key: "http_client",
                reason: e.to_string(),
            })?;

        Self::with_client(client, settings, credentials)
    }

    /// Creates a transport with a custom reqwest client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_client(
        client: Client,
        settings: &Settings,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, SettingsError> {
        Ok(Self {
            client,
            base_url: settings.base_url()?,
            timeout: settings.timeout(),
            credentials,
        })
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
        }
    }

    /// Appends the request path segments to the base URL and the query in order.
    ///
    /// Each segment is percent-encoded on its own, so `/`, `?` and `#` inside
    /// a post id stay part of that segment. Any path prefix of the base URL
    /// is kept.
    fn resolve_url(&self, request: &OutboundRequest) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                TransportError::InvalidUrl(format!("cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(request.path_segments());

        if !request.query().is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in request.query().to_pairs() {
                pairs.append_pair(&key, &value);
            }
        }

        Ok(url)
    }

    /// Maps reqwest errors to port `TransportError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            let host = error
                .url()
                .and_then(|u| u.host_str().map(ToString::to_string))
                .unwrap_or_else(|| "unknown".to_string());
            return TransportError::Connection(format!("{host}: {error}"));
        }

        TransportError::Other(error.to_string())
    }

    /// Extracts a readable message from an error response body.
    ///
    /// Prefers an `error` or `message` string field of a JSON body, then the
    /// raw body truncated, then the reason phrase.
    fn status_message(status: StatusCode, body: &[u8]) -> String {
        if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body)
            && let Some(message) = ["error", "message"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
        {
            return message.to_string();
        }

        let text = String::from_utf8_lossy(body);
        let text = text.trim();
        if text.is_empty() {
            return status.reason_phrase().to_string();
        }

        let mut chars = text.chars();
        let mut message: String = chars.by_ref().take(MAX_ERROR_BODY_CHARS).collect();
        if chars.next().is_some() {
            message.push_str("...");
        }
        message
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        request: &OutboundRequest,
        credential: &CredentialRef,
    ) -> Result<RemoteResponse, TransportError> {
        let api_key = self.credentials.api_key(credential).map_err(|e| {
            warn!(credential = %credential, error = %e, "credential lookup failed");
            TransportError::Credential(credential.name().to_string())
        })?;

        let url = self.resolve_url(request)?;
        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method()), url.as_str())
            .timeout(self.timeout);

        for header in request.headers().iter() {
            builder = builder.header(&header.name, &header.value);
        }
        builder = builder.header(API_KEY_HEADER, api_key);

        let start = Instant::now();
        debug!(method = %request.method(), path = url.path(), "sending request");

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = StatusCode::new(response.status().as_u16());
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Other(format!("failed to read body: {e}")))?
            .to_vec();

        debug!(
            status = status.as_u16(),
            bytes = bytes.len(),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "response received"
        );

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: Self::status_message(status, &bytes),
            });
        }

        let body = match request.body_encoding() {
            BodyEncoding::Text => match String::from_utf8(bytes) {
                Ok(text) => ResponseBody::Text(text),
                // Keep the bytes; the adapter decides whether that is fatal.
                Err(e) => ResponseBody::Binary(e.into_bytes()),
            },
            BodyEncoding::Binary => ResponseBody::Binary(bytes),
        };

        let mut remote = RemoteResponse::new(status, body);
        remote.headers = headers;
        debug!(content_type = remote.content_type().unwrap_or("-"), "response decoded");
        Ok(remote)
    }
}
