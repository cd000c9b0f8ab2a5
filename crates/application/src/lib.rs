//! Tweetshot Application - Core logic and ports
//!
//! This crate defines the screenshot core:
//! - Port traits for parameter resolution and HTTP transport
//! - Request construction and response adaptation
//! - The per-item batch processor with error isolation
//! - A template-driven parameter resolver

pub mod error;
pub mod item_processor;
pub mod options_resolver;
pub mod parameters;
pub mod ports;
pub mod request_builder;
pub mod response_adapter;

pub use error::{BatchError, ProcessError, ProcessResult, ValidationError};
pub use item_processor::ItemProcessor;
pub use options_resolver::{declared_default, fields, resolve_options};
pub use parameters::TemplateParameterResolver;
pub use ports::{ParameterError, ParameterResolver, Transport, TransportError};
pub use request_builder::{SCREENSHOT_PATH, accept_for_format, build_request};
pub use response_adapter::{ResponseShape, adapt_response};
