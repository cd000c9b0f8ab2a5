//! Tweetshot Domain - Core types
//!
//! This crate defines the domain model for the Tweetshot screenshot adapter:
//! request options, the outbound request, the remote response, and the
//! output records produced per input item.
//! All types here are pure Rust with no I/O dependencies.

pub mod credential;
pub mod error;
pub mod options;
pub mod output;
pub mod request;
pub mod response;

pub use credential::{CredentialRef, DEFAULT_CREDENTIAL};
pub use error::{DomainError, DomainResult};
pub use options::{
    Logo, OutputMode, RenderOverrides, ScreenshotFormat, ScreenshotRequestOptions, Theme,
};
pub use output::{BinaryAttachment, ErrorRecord, ItemOutcome, OutputItem};
pub use request::{
    BodyEncoding, Header, Headers, HttpMethod, OutboundRequest, QueryParams, QueryValue,
};
pub use response::{RemoteResponse, ResponseBody, StatusCode};
