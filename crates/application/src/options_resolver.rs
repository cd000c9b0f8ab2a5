//! Resolution of screenshot options from per-item parameters
//!
//! Declares the node parameters, their defaults, and turns resolved values
//! into validated [`ScreenshotRequestOptions`]. Unrecognized enum values
//! are rejected here, before any request is built.

use serde_json::{Map, Value};
use tweetshot_domain::{
    Logo, OutputMode, RenderOverrides, ScreenshotFormat, ScreenshotRequestOptions, Theme,
};

use crate::error::ProcessResult;
use crate::ports::{ParameterError, ParameterResolver};

/// Parameter names, as the host exposes them.
pub mod fields {
    /// Identifier of the post to render (required).
    pub const STATUS_ID: &str = "statusId";
    /// Rendering format.
    pub const FORMAT: &str = "format";
    /// Color theme.
    pub const THEME: &str = "theme";
    /// Logo variant.
    pub const LOGO: &str = "logo";
    /// Output mode.
    pub const OUTPUT_MODE: &str = "outputMode";
    /// Collection of rendering overrides.
    pub const ADDITIONAL_FIELDS: &str = "additionalFields";
}

/// Returns the declared default for a parameter, or `None` if it is required
/// or unknown.
#[must_use]
pub fn declared_default(field: &str) -> Option<Value> {
    match field {
        fields::FORMAT => Some(Value::from(ScreenshotFormat::default().as_str())),
        fields::THEME => Some(Value::from(Theme::default().as_str())),
        fields::LOGO => Some(Value::from(Logo::default().as_str())),
        fields::OUTPUT_MODE => Some(Value::from(OutputMode::default().as_str())),
        fields::ADDITIONAL_FIELDS => Some(Value::Object(Map::new())),
        _ => None,
    }
}

/// Resolves and validates the options for one item.
///
/// # Errors
///
/// Returns a validation error if a parameter is missing, has the wrong
/// type, or holds an unrecognized value.
pub fn resolve_options<R>(
    resolver: &R,
    item_index: usize,
) -> ProcessResult<ScreenshotRequestOptions>
where
    R: ParameterResolver + ?Sized,
{
    let target_id = target_id(resolver.resolve(item_index, fields::STATUS_ID)?)?;

    let format = text(fields::FORMAT, resolver.resolve(item_index, fields::FORMAT)?)?
        .parse::<ScreenshotFormat>()?;
    let theme = text(fields::THEME, resolver.resolve(item_index, fields::THEME)?)?
        .parse::<Theme>()?;
    let logo = text(fields::LOGO, resolver.resolve(item_index, fields::LOGO)?)?
        .parse::<Logo>()?;
    let output_mode = text(
        fields::OUTPUT_MODE,
        resolver.resolve(item_index, fields::OUTPUT_MODE)?,
    )?
    .parse::<OutputMode>()?;
    let overrides = overrides(resolver.resolve(item_index, fields::ADDITIONAL_FIELDS)?)?;

    Ok(ScreenshotRequestOptions::new(target_id)?
        .with_format(format)
        .with_theme(theme)
        .with_logo(logo)
        .with_output_mode(output_mode)
        .with_overrides(overrides))
}

/// Post identifiers are usually strings, but numeric ids are accepted too.
fn target_id(value: Value) -> Result<String, ParameterError> {
    match value {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(invalid(fields::STATUS_ID, &other, "a string")),
    }
}

fn text(field: &str, value: Value) -> Result<String, ParameterError> {
    match value {
        Value::String(text) => Ok(text),
        other => Err(invalid(field, &other, "a string")),
    }
}

fn overrides(value: Value) -> Result<RenderOverrides, ParameterError> {
    match value {
        Value::Null => Ok(RenderOverrides::default()),
        Value::Object(_) => {
            serde_json::from_value(value).map_err(|e| ParameterError::Invalid {
                field: fields::ADDITIONAL_FIELDS.to_string(),
                reason: e.to_string(),
            })
        }
        other => Err(invalid(fields::ADDITIONAL_FIELDS, &other, "an object")),
    }
}

fn invalid(field: &str, value: &Value, expected: &str) -> ParameterError {
    ParameterError::Invalid {
        field: field.to_string(),
        reason: format!("expected {expected}, got {value}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{ProcessError, ValidationError};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tweetshot_domain::DomainError;

    /// Serves the same parameter object for every item, with declared defaults.
    struct Fixed(Value);

    impl ParameterResolver for Fixed {
        fn resolve(&self, _item_index: usize, field: &str) -> Result<Value, ParameterError> {
            self.0
                .get(field)
                .cloned()
                .or_else(|| declared_default(field))
                .ok_or_else(|| ParameterError::Missing {
                    field: field.to_string(),
                })
        }
    }

    #[test]
    fn test_defaults_apply() {
        let options = resolve_options(&Fixed(json!({ "statusId": "123" })), 0).unwrap();
        assert_eq!(options, ScreenshotRequestOptions::new("123").unwrap());
    }

    #[test]
    fn test_all_fields() {
        let resolver = Fixed(json!({
            "statusId": 1_617_979_122_625_712_128_u64,
            "format": "png",
            "theme": "dark",
            "logo": "bluebird",
            "outputMode": "url",
            "additionalFields": { "showViews": false, "borderRadius": 12 }
        }));

        let options = resolve_options(&resolver, 0).unwrap();
        assert_eq!(options.target_id(), "1617979122625712128");
        assert_eq!(options.format, ScreenshotFormat::Png);
        assert_eq!(options.theme, Theme::Dark);
        assert_eq!(options.logo, Logo::Bluebird);
        assert_eq!(options.output_mode, OutputMode::Url);
        assert_eq!(options.overrides.show_views, Some(false));
        assert_eq!(options.overrides.border_radius, Some(12));
        assert_eq!(options.overrides.show_stats, None);
    }

    #[test]
    fn test_missing_status_id() {
        let err = resolve_options(&Fixed(json!({})), 0).unwrap_err();
        assert_eq!(
            err,
            ProcessError::Validation(ValidationError::Parameter(ParameterError::Missing {
                field: "statusId".to_string()
            }))
        );
    }

    #[test]
    fn test_unrecognized_output_mode_rejected() {
        let err = resolve_options(&Fixed(json!({ "statusId": "1", "outputMode": "link" })), 0)
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::Validation(ValidationError::Option(DomainError::InvalidOption {
                field: "outputMode",
                ..
            }))
        ));
    }

    #[test]
    fn test_empty_status_id_rejected() {
        let err = resolve_options(&Fixed(json!({ "statusId": "" })), 0).unwrap_err();
        assert_eq!(err, ProcessError::from(DomainError::EmptyTargetId));
    }

    #[test]
    fn test_non_string_format_rejected() {
        let err = resolve_options(&Fixed(json!({ "statusId": "1", "format": 3 })), 0).unwrap_err();
        assert_eq!(err.to_string(), "invalid parameter 'format': expected a string, got 3");
    }

    #[test]
    fn test_unknown_override_rejected() {
        let resolver = Fixed(json!({ "statusId": "1", "additionalFields": { "fontSize": 3 } }));
        let err = resolve_options(&resolver, 0).unwrap_err();
        assert!(err.to_string().contains("additionalFields"));
    }
}
