//! Remote response types
//!
//! What the transport hands back: status, headers, and a body that is
//! either text or raw bytes depending on the request's encoding hint.

use std::collections::HashMap;
use std::string::FromUtf8Error;

use serde::{Deserialize, Serialize};

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns true if this is a 2xx success status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns the canonical reason phrase for the statuses the API is known to send.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            400 => "Bad Request",
            401 => "Unauthorized",
            402 => "Payment Required",
            403 => "Forbidden",
            404 => "Not Found",
            408 => "Request Timeout",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Response body, typed by the encoding hint the request carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// Body decoded as text
    Text(String),
    /// Raw body bytes
    Binary(Vec<u8>),
}

impl ResponseBody {
    /// Returns the body as bytes, whatever its variant.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }

    /// Consumes the body and returns raw bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }

    /// Consumes the body and returns text.
    ///
    /// # Errors
    ///
    /// Returns an error if a binary body is not valid UTF-8.
    pub fn into_text(self) -> Result<String, FromUtf8Error> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Binary(bytes) => String::from_utf8(bytes),
        }
    }
}

/// A response received from the rendering API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: ResponseBody,
}

impl RemoteResponse {
    /// Creates a new response with no headers.
    #[must_use]
    pub fn new(status: impl Into<StatusCode>, body: ResponseBody) -> Self {
        Self {
            status: status.into(),
            headers: HashMap::new(),
            body,
        }
    }

    /// Creates a 200 response with a text body.
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        Self::new(200, ResponseBody::Text(body.into()))
    }

    /// Creates a 200 response with a binary body.
    #[must_use]
    pub fn binary(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, ResponseBody::Binary(body.into()))
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the Content-Type header, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.get_header("content-type")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_code_success_range() {
        assert!(StatusCode::new(200).is_success());
        assert!(StatusCode::new(204).is_success());
        assert!(!StatusCode::new(302).is_success());
        assert!(!StatusCode::new(401).is_success());
    }

    #[test]
    fn test_status_code_display() {
        assert_eq!(StatusCode::new(429).to_string(), "429 Too Many Requests");
        assert_eq!(StatusCode::new(599).to_string(), "599 Unknown");
    }

    #[test]
    fn test_body_into_text() {
        let body = ResponseBody::Binary(b"<div>hi</div>".to_vec());
        assert_eq!(body.into_text().unwrap(), "<div>hi</div>");

        let invalid = ResponseBody::Binary(vec![0xff, 0xfe, 0x00]);
        assert!(invalid.into_text().is_err());
    }

    #[test]
    fn test_header_lookup() {
        let mut response = RemoteResponse::binary(vec![1, 2, 3]);
        response
            .headers
            .insert("Content-Type".to_string(), "image/png".to_string());
        assert_eq!(response.content_type(), Some("image/png"));
        assert_eq!(response.get_header("CONTENT-TYPE"), Some("image/png"));
        assert_eq!(response.body.as_bytes(), [1, 2, 3]);
    }
}
