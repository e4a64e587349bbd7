//! Placeholder substitution over plain text.

use serde::Serialize;

use super::flatten::FlatTable;
use super::placeholder::placeholders;
use super::resolver::resolve;

/// Counters for one [`replace`] call.
///
/// `found == replaced + missing` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Placeholders scanned
    pub found: usize,
    /// Placeholders resolved to a non-empty value
    pub replaced: usize,
    /// Placeholders left verbatim for lack of data
    pub missing: usize,
}

impl MergeStats {
    /// True when every placeholder was resolved.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.missing == 0
    }
}

/// Replace every resolvable placeholder in `text`.
///
/// Matches are collected first and applied from the highest offset down, so
/// the recorded offsets of the matches still to be applied stay valid.
/// Unresolved placeholders are left in the output untouched.
///
/// # Examples
///
/// ```rust
/// use json2doc::merge::{FlatTable, replace};
///
/// let mut values = FlatTable::new();
/// values.insert("n".to_string(), "Ann".to_string());
///
/// let (text, stats) = replace("{{n}} and {{n}}, not {{x}}", &values);
/// assert_eq!(text, "Ann and Ann, not {{x}}");
/// assert_eq!((stats.found, stats.replaced, stats.missing), (3, 2, 1));
/// ```
#[must_use]
pub fn replace(text: &str, table: &FlatTable) -> (String, MergeStats) {
    let mut stats = MergeStats::default();
    let mut edits = Vec::new();

    for placeholder in placeholders(text) {
        stats.found += 1;
        match resolve(placeholder.key, table) {
            Some(value) => {
                stats.replaced += 1;
                edits.push((placeholder.span, value));
            }
            None => stats.missing += 1,
        }
    }

    let mut merged = text.to_string();
    for (span, value) in edits.into_iter().rev() {
        merged.replace_range(span, value);
    }

    (merged, stats)
}
