//! Outbound request specification

use serde::{Deserialize, Serialize};

use super::{Headers, HttpMethod, QueryParams};

/// How the transport should decode the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyEncoding {
    /// Decode as UTF-8 text (markup or JSON)
    Text,
    /// Keep the raw bytes (rendered images)
    Binary,
}

/// A fully specified HTTP request, ready to hand to a transport.
///
/// Built once per item and read-only afterwards. The path is a list of
/// unencoded segments that the transport appends to its configured base URL,
/// so a segment can never add query parameters or climb out of the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundRequest {
    method: HttpMethod,
    path_segments: Vec<String>,
    query: QueryParams,
    headers: Headers,
    body_encoding: BodyEncoding,
}

impl OutboundRequest {
    /// Creates a new request.
    #[must_use]
    pub const fn new(
        method: HttpMethod,
        path_segments: Vec<String>,
        query: QueryParams,
        headers: Headers,
        body_encoding: BodyEncoding,
    ) -> Self {
        Self {
            method,
            path_segments,
            query,
            headers,
            body_encoding,
        }
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the unencoded path segments.
    #[must_use]
    pub fn path_segments(&self) -> &[String] {
        &self.path_segments
    }

    /// Returns the path for display, segments joined by `/` without encoding.
    #[must_use]
    pub fn path(&self) -> String {
        self.path_segments
            .iter()
            .fold(String::new(), |path, segment| path + "/" + segment)
    }

    /// Returns the query parameters in wire order.
    #[must_use]
    pub const fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Returns the request headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns how the response body should be decoded.
    #[must_use]
    pub const fn body_encoding(&self) -> BodyEncoding {
        self.body_encoding
    }
}
