//! Template-driven parameter resolution
//!
//! Node parameters are shared by the whole batch; string values may pull
//! fields of the current input item in with `{{ name }}`.

use serde_json::{Map, Value};

use super::parser::{TemplateReference, parse_references, sole_reference};
use crate::options_resolver::declared_default;
use crate::ports::{ParameterError, ParameterResolver};

/// Built-in reference expanding to the current item index.
pub const INDEX_REFERENCE: &str = "$index";

/// Prefix accepted in front of item field paths, as in `{{ $json.id }}`.
pub const ITEM_PREFIX: &str = "$json.";

/// Resolves node parameters against the batch's input items.
///
/// A string that is exactly one reference takes the referenced value with
/// its JSON type; references embedded in longer text are stringified.
/// Dotted paths (`{{ tweet.id }}`) walk nested objects and arrays.
#[derive(Debug, Clone, Default)]
pub struct TemplateParameterResolver {
    parameters: Map<String, Value>,
    items: Vec<Value>,
}

impl TemplateParameterResolver {
    /// Creates a resolver for the given node parameters and input items.
    #[must_use]
    pub const fn new(parameters: Map<String, Value>, items: Vec<Value>) -> Self {
        Self { parameters, items }
    }

    /// Returns the number of input items.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    fn render(
        &self,
        field: &str,
        value: Value,
        item: &Value,
        item_index: usize,
    ) -> Result<Value, ParameterError> {
        match value {
            Value::String(text) => Self::render_text(field, text, item, item_index),
            Value::Array(values) => values
                .into_iter()
                .map(|v| self.render(field, v, item, item_index))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| Ok((k, self.render(field, v, item, item_index)?)))
                .collect::<Result<Map<_, _>, _>>()
                .map(Value::Object),
            other => Ok(other),
        }
    }

    fn render_text(
        field: &str,
        text: String,
        item: &Value,
        item_index: usize,
    ) -> Result<Value, ParameterError> {
        if let Some(reference) = sole_reference(&text) {
            return lookup(field, &reference, item, item_index);
        }

        let references = parse_references(&text);
        if references.is_empty() {
            return Ok(Value::String(text));
        }

        let mut rendered = String::with_capacity(text.len());
        let mut last_end = 0;
        for reference in &references {
            rendered.push_str(&text[last_end..reference.span.start]);
            match lookup(field, reference, item, item_index)? {
                Value::String(s) => rendered.push_str(&s),
                Value::Null => {}
                other => rendered.push_str(&other.to_string()),
            }
            last_end = reference.span.end;
        }
        rendered.push_str(&text[last_end..]);

        Ok(Value::String(rendered))
    }
}

impl ParameterResolver for TemplateParameterResolver {
    fn resolve(&self, item_index: usize, field: &str) -> Result<Value, ParameterError> {
        let item = self
            .items
            .get(item_index)
            .ok_or(ParameterError::NoSuchItem { index: item_index })?;

        let raw = self
            .parameters
            .get(field)
            .cloned()
            .or_else(|| declared_default(field))
            .ok_or_else(|| ParameterError::Missing {
                field: field.to_string(),
            })?;

        self.render(field, raw, item, item_index)
    }
}

fn lookup(
    field: &str,
    reference: &TemplateReference,
    item: &Value,
    item_index: usize,
) -> Result<Value, ParameterError> {
    let unresolved = || ParameterError::Unresolved {
        field: field.to_string(),
        reference: reference.name.clone(),
    };

    if reference.name == INDEX_REFERENCE {
        return Ok(Value::from(item_index));
    }
    if reference.is_builtin() {
        return Err(unresolved());
    }

    let path = reference
        .name
        .strip_prefix(ITEM_PREFIX)
        .unwrap_or(&reference.name);

    path.split('.')
        .try_fold(item, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(values) => segment.parse::<usize>().ok().and_then(|i| values.get(i)),
            _ => None,
        })
        .cloned()
        .ok_or_else(unresolved)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn resolver(parameters: Value, items: Vec<Value>) -> TemplateParameterResolver {
        let Value::Object(parameters) = parameters else {
            unreachable!("test parameters are objects")
        };
        TemplateParameterResolver::new(parameters, items)
    }

    #[test]
    fn test_literal_values_pass_through() {
        let r = resolver(json!({ "statusId": "123", "format": "png" }), vec![json!({})]);
        assert_eq!(r.resolve(0, "statusId").unwrap(), json!("123"));
        assert_eq!(r.resolve(0, "format").unwrap(), json!("png"));
    }

    #[test]
    fn test_declared_defaults() {
        let r = resolver(json!({}), vec![json!({})]);
        assert_eq!(r.resolve(0, "theme").unwrap(), json!("light"));
        assert_eq!(r.resolve(0, "additionalFields").unwrap(), json!({}));
        assert_eq!(
            r.resolve(0, "statusId").unwrap_err(),
            ParameterError::Missing {
                field: "statusId".to_string()
            }
        );
    }

    #[test]
    fn test_sole_reference_keeps_type() {
        let r = resolver(
            json!({ "statusId": "{{ id }}", "additionalFields": { "showStats": "{{ stats }}" } }),
            vec![json!({ "id": 1_617_979_122_625_712_128_u64, "stats": false })],
        );
        assert_eq!(r.resolve(0, "statusId").unwrap(), json!(1_617_979_122_625_712_128_u64));
        assert_eq!(
            r.resolve(0, "additionalFields").unwrap(),
            json!({ "showStats": false })
        );
    }

    #[test]
    fn test_embedded_references_are_stringified() {
        let r = resolver(
            json!({
                "statusId": "{{ id }}",
                "additionalFields": {
                    "containerBackground": "linear-gradient({{ from }}, {{ to }})"
                }
            }),
            vec![json!({ "id": "1", "from": "#000", "to": "#fff" })],
        );
        assert_eq!(
            r.resolve(0, "additionalFields").unwrap(),
            json!({ "containerBackground": "linear-gradient(#000, #fff)" })
        );
    }

    #[test]
    fn test_paths_and_prefix() {
        let r = resolver(
            json!({ "statusId": "{{ $json.tweet.ids.1 }}" }),
            vec![json!({ "tweet": { "ids": ["a", "b"] } })],
        );
        assert_eq!(r.resolve(0, "statusId").unwrap(), json!("b"));
    }

    #[test]
    fn test_index_builtin() {
        let r = resolver(json!({ "statusId": "row-{{ $index }}" }), vec![json!({}), json!({})]);
        assert_eq!(r.resolve(1, "statusId").unwrap(), json!("row-1"));
    }

    #[test]
    fn test_each_item_sees_its_own_fields() {
        let r = resolver(
            json!({ "statusId": "{{ id }}" }),
            vec![json!({ "id": "a" }), json!({ "id": "b" })],
        );
        assert_eq!(r.item_count(), 2);
        assert_eq!(r.resolve(0, "statusId").unwrap(), json!("a"));
        assert_eq!(r.resolve(1, "statusId").unwrap(), json!("b"));
    }

    #[test]
    fn test_unresolved_reference() {
        let r = resolver(json!({ "statusId": "{{ missing }}" }), vec![json!({ "id": "1" })]);
        assert_eq!(
            r.resolve(0, "statusId").unwrap_err(),
            ParameterError::Unresolved {
                field: "statusId".to_string(),
                reference: "missing".to_string(),
            }
        );

        let r = resolver(json!({ "statusId": "{{ $now }}" }), vec![json!({})]);
        assert!(matches!(
            r.resolve(0, "statusId"),
            Err(ParameterError::Unresolved { .. })
        ));
    }

    #[test]
    fn test_index_out_of_range() {
        let r = resolver(json!({ "statusId": "1" }), vec![json!({})]);
        assert_eq!(
            r.resolve(3, "statusId").unwrap_err(),
            ParameterError::NoSuchItem { index: 3 }
        );
    }
}
