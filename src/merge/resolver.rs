//! Variable resolution against a flattened table.

use super::flatten::FlatTable;

/// Resolve a placeholder key to its value.
///
/// The key is trimmed and looked up verbatim: `metadata.version` must exist as
/// a composite key, no walking from a prefix happens at this point. An empty
/// stored value counts as not found.
///
/// # Examples
///
/// ```rust
/// use json2doc::merge::{flatten, resolve};
///
/// let (values, _) = flatten(r#"{"metadata": {"version": "1.0.0"}, "blank": ""}"#).unwrap();
/// assert_eq!(resolve(" metadata.version ", &values), Some("1.0.0"));
/// assert_eq!(resolve("metadata", &values), None);
/// assert_eq!(resolve("blank", &values), None);
/// ```
#[must_use]
pub fn resolve<'a>(key: &str, table: &'a FlatTable) -> Option<&'a str> {
    table
        .get(key.trim())
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}
