//! Screenshot request options
//!
//! The option set a caller supplies for one screenshot: the target post,
//! the base rendering choices, and any rendering overrides.

use std::fmt;
use std::str::FromStr;

use mime::Mime;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Matches `input` case-insensitively against the string form of `choices`.
fn parse_choice<T: Copy>(
    input: &str,
    choices: &[T],
    as_str: fn(T) -> &'static str,
    field: &'static str,
    expected: &'static str,
) -> DomainResult<T> {
    let needle = input.trim();
    choices
        .iter()
        .copied()
        .find(|choice| as_str(*choice).eq_ignore_ascii_case(needle))
        .ok_or_else(|| DomainError::InvalidOption {
            field,
            value: input.to_string(),
            expected,
        })
}

/// Rendering format of the screenshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScreenshotFormat {
    /// Scalable vector image
    #[default]
    Svg,
    /// Raster image
    Png,
    /// Raw HTML markup
    Html,
}

impl ScreenshotFormat {
    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Svg, Self::Png, Self::Html]
    }

    /// Returns the format as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Html => "html",
        }
    }

    /// Returns the MIME type of a response rendered in this format.
    #[must_use]
    pub fn mime_type(self) -> Mime {
        match self {
            Self::Svg => mime::IMAGE_SVG,
            Self::Png => mime::IMAGE_PNG,
            Self::Html => mime::TEXT_HTML,
        }
    }
}

impl fmt::Display for ScreenshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenshotFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        parse_choice(s, Self::all(), Self::as_str, "format", "svg, png, html")
    }
}

/// Color theme of the rendered post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background
    #[default]
    Light,
    /// Dark background
    Dark,
}

impl Theme {
    /// Returns all available themes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Light, Self::Dark]
    }

    /// Returns the theme as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        parse_choice(s, Self::all(), Self::as_str, "theme", "light, dark")
    }
}

/// Logo stamped on the rendered post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Logo {
    /// The current X logo
    #[default]
    X,
    /// The classic bird logo
    Bluebird,
    /// No logo
    None,
}

impl Logo {
    /// Returns all available logos.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::X, Self::Bluebird, Self::None]
    }

    /// Returns the logo as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Bluebird => "bluebird",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Logo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Logo {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        parse_choice(s, Self::all(), Self::as_str, "logo", "x, bluebird, none")
    }
}

/// Whether the remote service returns the rendered media or a JSON reference to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Raw rendered media
    #[default]
    Binary,
    /// JSON document describing where the media lives
    Url,
}

impl OutputMode {
    /// Returns all available output modes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Binary, Self::Url]
    }

    /// Returns the output mode as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Url => "url",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        parse_choice(s, Self::all(), Self::as_str, "outputMode", "binary, url")
    }
}

/// Optional rendering tweaks layered on top of the base options.
///
/// Every field is `None` unless the caller set it. A boolean set to `false`
/// is a real override and is kept distinct from an unset field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RenderOverrides {
    /// Show the full text of long posts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_full_text: Option<bool>,
    /// Show the post timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_timestamp: Option<bool>,
    /// Show the view counter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_views: Option<bool>,
    /// Show reply/repost/like statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_stats: Option<bool>,
    /// CSS background of the container (color or gradient)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_background: Option<String>,
    /// Padding around the post, in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_padding: Option<u32>,
    /// Corner radius of the post card, in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
}

impl RenderOverrides {
    /// Returns true if no override was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Everything needed to request one screenshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotRequestOptions {
    target_id: String,
    /// Rendering format
    pub format: ScreenshotFormat,
    /// Color theme
    pub theme: Theme,
    /// Logo variant
    pub logo: Logo,
    /// Output mode
    pub output_mode: OutputMode,
    /// Rendering overrides
    #[serde(skip_serializing_if = "RenderOverrides::is_empty")]
    pub overrides: RenderOverrides,
}

impl ScreenshotRequestOptions {
    /// Creates options for the given post with default rendering choices.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyTargetId`] if `target_id` is blank, or
    /// [`DomainError::InvalidTargetId`] for `.` and `..`.
    pub fn new(target_id: impl Into<String>) -> DomainResult<Self> {
        let target_id = target_id.into().trim().to_string();
        if target_id.is_empty() {
            return Err(DomainError::EmptyTargetId);
        }
        // Dot segments would be dropped from the request path.
        if matches!(target_id.as_str(), "." | "..") {
            return Err(DomainError::InvalidTargetId(target_id));
        }

        Ok(Self {
            target_id,
            format: ScreenshotFormat::default(),
            theme: Theme::default(),
            logo: Logo::default(),
            output_mode: OutputMode::default(),
            overrides: RenderOverrides::default(),
        })
    }

    /// Returns the identifier of the post to render.
    #[must_use]
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Sets the rendering format.
    #[must_use]
    pub const fn with_format(mut self, format: ScreenshotFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the color theme.
    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the logo variant.
    #[must_use]
    pub const fn with_logo(mut self, logo: Logo) -> Self {
        self.logo = logo;
        self
    }

    /// Sets the output mode.
    #[must_use]
    pub const fn with_output_mode(mut self, output_mode: OutputMode) -> Self {
        self.output_mode = output_mode;
        self
    }

    /// Replaces the rendering overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: RenderOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_from_str() {
        assert_eq!("svg".parse::<ScreenshotFormat>().unwrap(), ScreenshotFormat::Svg);
        assert_eq!("PNG".parse::<ScreenshotFormat>().unwrap(), ScreenshotFormat::Png);
        assert_eq!(" html ".parse::<ScreenshotFormat>().unwrap(), ScreenshotFormat::Html);
    }

    #[test]
    fn test_invalid_choice_names_field() {
        let err = "jpeg".parse::<ScreenshotFormat>().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidOption {
                field: "format",
                value: "jpeg".to_string(),
                expected: "svg, png, html",
            }
        );

        assert!("sepia".parse::<Theme>().is_err());
        assert!("twitter".parse::<Logo>().is_err());
        assert!("returnUrl".parse::<OutputMode>().is_err());
    }

    #[test]
    fn test_display_matches_wire_value() {
        assert_eq!(Logo::None.to_string(), "none");
        assert_eq!(Logo::Bluebird.to_string(), "bluebird");
        assert_eq!(OutputMode::Url.to_string(), "url");
        assert_eq!(Theme::Dark.to_string(), "dark");
    }

    #[test]
    fn test_defaults() {
        let options = ScreenshotRequestOptions::new("1617979122625712128").unwrap();
        assert_eq!(options.format, ScreenshotFormat::Svg);
        assert_eq!(options.theme, Theme::Light);
        assert_eq!(options.logo, Logo::X);
        assert_eq!(options.output_mode, OutputMode::Binary);
        assert!(options.overrides.is_empty());
    }

    #[test]
    fn test_blank_target_id_rejected() {
        assert_eq!(
            ScreenshotRequestOptions::new("   "),
            Err(DomainError::EmptyTargetId)
        );
    }

    #[test]
    fn test_dot_segment_target_id_rejected() {
        assert_eq!(
            ScreenshotRequestOptions::new(".."),
            Err(DomainError::InvalidTargetId("..".to_string()))
        );
        assert!(ScreenshotRequestOptions::new(" . ").is_err());
        assert!(ScreenshotRequestOptions::new("../x").is_ok());
    }

    #[test]
    fn test_target_id_is_trimmed() {
        let options = ScreenshotRequestOptions::new(" 123 ").unwrap();
        assert_eq!(options.target_id(), "123");
    }

    #[test]
    fn test_overrides_reject_unknown_fields() {
        let result: Result<RenderOverrides, _> =
            serde_json::from_str(r#"{"showStats": false, "fontSize": 12}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_keep_false_distinct_from_unset() {
        let overrides: RenderOverrides =
            serde_json::from_str(r#"{"showStats": false}"#).unwrap();
        assert_eq!(overrides.show_stats, Some(false));
        assert_eq!(overrides.show_views, None);
        assert!(!overrides.is_empty());
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(ScreenshotFormat::Svg.mime_type().as_ref(), "image/svg+xml");
        assert_eq!(ScreenshotFormat::Png.mime_type().as_ref(), "image/png");
        assert_eq!(ScreenshotFormat::Html.mime_type().as_ref(), "text/html");
    }
}
