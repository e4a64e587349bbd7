//! Placeholder scanning.
//!
//! A placeholder is `{{`, one or more characters other than `}`, then `}}`.
//! The captured name is trimmed, so `{{ name }}` and `{{name}}` refer to the
//! same key.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

pub(crate) static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("placeholder pattern is valid"));

/// One placeholder occurrence in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Trimmed key between the braces
    pub key: &'a str,
    /// Byte range of the whole token, delimiters included
    pub span: Range<usize>,
}

/// Iterate over every placeholder in `text`, left to right.
pub fn placeholders(text: &str) -> impl Iterator<Item = Placeholder<'_>> {
    PLACEHOLDER_PATTERN.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let inner = caps.get(1)?;
        Some(Placeholder {
            key: inner.as_str().trim(),
            span: whole.range(),
        })
    })
}

/// Every placeholder name in `text`, trimmed, in document order, duplicates
/// included.
///
/// # Examples
///
/// ```rust
/// use json2doc::merge::find_all;
///
/// let names = find_all("Dear {{ name }}, order {{order.id}} for {{name}}");
/// assert_eq!(names, vec!["name", "order.id", "name"]);
/// ```
#[must_use]
pub fn find_all(text: &str) -> Vec<String> {
    placeholders(text).map(|p| p.key.to_string()).collect()
}

/// Placeholder names with duplicates removed, first occurrence wins.
#[must_use]
pub fn find_unique(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    placeholders(text)
        .filter(|p| seen.insert(p.key))
        .map(|p| p.key.to_string())
        .collect()
}
