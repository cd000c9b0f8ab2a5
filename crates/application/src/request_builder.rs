//! Request construction
//!
//! Maps one item's options onto the outbound screenshot request. Pure and
//! total: every valid option set yields a request.

use mime::Mime;
use tweetshot_domain::{
    Header, Headers, HttpMethod, OutboundRequest, OutputMode, QueryParams, ScreenshotFormat,
    ScreenshotRequestOptions,
};

use crate::response_adapter::ResponseShape;

/// Path segments of the screenshot resource; the post id is appended as the last segment.
pub const SCREENSHOT_PATH: [&str; 3] = ["api", "v1", "screenshot"];

/// Returns the `Accept` MIME type for a wire format name.
///
/// Unrecognized names fall back to `*/*`. Requests built from validated
/// options use [`ScreenshotFormat::mime_type`] directly.
#[must_use]
pub fn accept_for_format(format: &str) -> Mime {
    format
        .parse::<ScreenshotFormat>()
        .map_or(mime::STAR_STAR, ScreenshotFormat::mime_type)
}

/// Builds the outbound request for one item.
#[must_use]
pub fn build_request(options: &ScreenshotRequestOptions) -> OutboundRequest {
    let path_segments = SCREENSHOT_PATH
        .iter()
        .map(ToString::to_string)
        .chain([options.target_id().to_string()])
        .collect();

    let mut query = QueryParams::new();
    query.push("format", options.format.as_str());
    query.push("theme", options.theme.as_str());
    query.push("logo", options.logo.as_str());
    query.push("outputMode", options.output_mode.as_str());

    let overrides = &options.overrides;
    let flags = [
        ("showFullText", overrides.show_full_text),
        ("showTimestamp", overrides.show_timestamp),
        ("showViews", overrides.show_views),
        ("showStats", overrides.show_stats),
    ];
    for (key, value) in flags
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
    {
        query.push(key, value);
    }
    if let Some(background) = overrides
        .container_background
        .as_deref()
        .filter(|background| !background.trim().is_empty())
    {
        query.push("containerBackground", background);
    }
    if let Some(padding) = overrides.container_padding {
        query.push("containerPadding", padding);
    }
    if let Some(radius) = overrides.border_radius {
        query.push("borderRadius", radius);
    }

    let accept = options.format.mime_type();
    let accept = match options.output_mode {
        OutputMode::Binary => accept.to_string(),
        OutputMode::Url => format!("{accept}, {}", mime::APPLICATION_JSON),
    };
    let headers: Headers = [Header::new("Accept", accept)].into_iter().collect();

    OutboundRequest::new(
        HttpMethod::Get,
        path_segments,
        query,
        headers,
        ResponseShape::for_options(options).body_encoding(),
    )
}
