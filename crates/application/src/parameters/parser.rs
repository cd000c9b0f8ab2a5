//! Reference parser for `{{ name }}` templates
//!
//! Finds item-field references in parameter strings with their positions.

use std::ops::Range;

/// A `{{ name }}` reference found in a template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateReference {
    /// The referenced name, trimmed, without the braces.
    pub name: String,

    /// Byte range of the whole `{{ ... }}` in the original string.
    pub span: Range<usize>,
}

impl TemplateReference {
    /// Creates a new reference.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Returns true for built-in names such as `$index`.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        self.name.starts_with('$') && !self.name.starts_with("$json.")
    }
}

/// Parses a string and extracts all references.
///
/// # Examples
///
/// ```
/// use tweetshot_application::parameters::parse_references;
///
/// let refs = parse_references("{{ tweetId }} at {{$index}}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "tweetId");
/// assert_eq!(refs[1].name, "$index");
/// assert!(refs[1].is_builtin());
/// ```
#[must_use]
pub fn parse_references(input: &str) -> Vec<TemplateReference> {
    let mut references = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if ch != '{' || !matches!(chars.peek(), Some((_, '{'))) {
            continue;
        }
        chars.next();

        let mut name = String::new();
        let mut closed = false;
        while let Some((_, ch)) = chars.next() {
            if ch == '}'
                && let Some(&(end_idx, '}')) = chars.peek()
            {
                chars.next();
                let trimmed = name.trim();
                if !trimmed.is_empty() {
                    references.push(TemplateReference::new(trimmed, start..end_idx + 1));
                }
                closed = true;
                break;
            }
            name.push(ch);
        }

        // Unterminated reference: the rest of the string is literal text.
        if !closed {
            break;
        }
    }

    references
}

/// Returns the single reference when `input` consists of nothing else.
///
/// Surrounding whitespace is ignored.
#[must_use]
pub fn sole_reference(input: &str) -> Option<TemplateReference> {
    let trimmed = input.trim();
    let offset = input.len() - input.trim_start().len();
    let mut refs = parse_references(trimmed);
    if refs.len() != 1 || refs[0].span != (0..trimmed.len()) {
        return None;
    }

    let mut only = refs.pop()?;
    only.span = only.span.start + offset..only.span.end + offset;
    Some(only)
}
