//! Template parameter resolution
//!
//! Resolves node parameters per input item, expanding `{{ name }}`
//! references against the item's fields.
//!
//! # Usage
//!
//! ```
//! use serde_json::json;
//! use tweetshot_application::parameters::TemplateParameterResolver;
//! use tweetshot_application::ports::ParameterResolver;
//!
//! let params = json!({ "statusId": "{{ id }}", "format": "png" });
//! let items = vec![json!({ "id": "1617979122625712128" })];
//! let params = params.as_object().cloned().unwrap_or_default();
//! let resolver = TemplateParameterResolver::new(params, items);
//!
//! assert_eq!(resolver.resolve(0, "statusId").unwrap(), json!("1617979122625712128"));
//! assert_eq!(resolver.resolve(0, "theme").unwrap(), json!("light"));
//! ```

pub mod parser;
pub mod resolver;

pub use parser::{TemplateReference, parse_references, sole_reference};
pub use resolver::{INDEX_REFERENCE, ITEM_PREFIX, TemplateParameterResolver};
