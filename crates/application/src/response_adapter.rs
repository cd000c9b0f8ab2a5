//! Response adaptation
//!
//! Turns a remote response into the output item for one input item. The
//! shape is picked from the options alone, first match wins:
//!
//! 1. `outputMode == url` → the body is JSON and becomes the item payload
//! 2. `format == html` → the body is markup, wrapped as `{ "html": ... }`
//! 3. otherwise → the body is a rendered image, attached as `tweet.<format>`
//!
//! The output mode outranks the format: in `url` mode the service returns a
//! JSON reference whatever format was requested.

use serde_json::{Map, Value};
use tweetshot_domain::{
    BinaryAttachment, BodyEncoding, OutputItem, OutputMode, RemoteResponse, ScreenshotFormat,
    ScreenshotRequestOptions,
};

use crate::error::{ProcessError, ProcessResult};

/// File stem of binary attachments.
pub const ATTACHMENT_STEM: &str = "tweet";

/// How a response body is turned into an output item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// JSON body passed through as the item payload
    StructuredPassthrough,
    /// Markup body wrapped as `{ "html": <text> }`
    TextPassthrough,
    /// Raw bytes attached as a named file
    BinaryAttachment,
}

impl ResponseShape {
    /// Selects the shape for a format and output mode.
    #[must_use]
    pub const fn select(format: ScreenshotFormat, output_mode: OutputMode) -> Self {
        match (output_mode, format) {
            (OutputMode::Url, _) => Self::StructuredPassthrough,
            (OutputMode::Binary, ScreenshotFormat::Html) => Self::TextPassthrough,
            (OutputMode::Binary, ScreenshotFormat::Svg | ScreenshotFormat::Png) => {
                Self::BinaryAttachment
            }
        }
    }

    /// Selects the shape for an option set.
    #[must_use]
    pub const fn for_options(options: &ScreenshotRequestOptions) -> Self {
        Self::select(options.format, options.output_mode)
    }

    /// Returns how the transport must decode the body for this shape.
    #[must_use]
    pub const fn body_encoding(self) -> BodyEncoding {
        match self {
            Self::StructuredPassthrough | Self::TextPassthrough => BodyEncoding::Text,
            Self::BinaryAttachment => BodyEncoding::Binary,
        }
    }

    /// Returns a short name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StructuredPassthrough => "json",
            Self::TextPassthrough => "html",
            Self::BinaryAttachment => "binary",
        }
    }
}

/// Adapts the response for the item at `item_index`.
///
/// # Errors
///
/// Returns [`ProcessError::MalformedResponse`] if the body does not fit the
/// negotiated shape: not JSON in `url` mode, or not UTF-8 for markup.
pub fn adapt_response(
    response: RemoteResponse,
    options: &ScreenshotRequestOptions,
    item_index: usize,
) -> ProcessResult<OutputItem> {
    match ResponseShape::for_options(options) {
        ResponseShape::StructuredPassthrough => {
            let value: Value = serde_json::from_slice(response.body.as_bytes()).map_err(|e| {
                ProcessError::MalformedResponse(format!("expected a JSON body in url mode: {e}"))
            })?;
            let json = match value {
                Value::Object(map) => map,
                other => {
                    let mut map = Map::new();
                    map.insert("data".to_string(), other);
                    map
                }
            };
            Ok(OutputItem::json(item_index, json))
        }
        ResponseShape::TextPassthrough => {
            let html = response.body.into_text().map_err(|e| {
                ProcessError::MalformedResponse(format!("HTML body is not valid UTF-8: {e}"))
            })?;
            let mut json = Map::new();
            json.insert("html".to_string(), Value::String(html));
            Ok(OutputItem::json(item_index, json))
        }
        ResponseShape::BinaryAttachment => {
            let attachment = BinaryAttachment::new(
                response.body.into_bytes(),
                ATTACHMENT_STEM,
                options.format.as_str(),
                options.format.mime_type().to_string(),
            );
            Ok(OutputItem::binary(item_index, attachment))
        }
    }
}
