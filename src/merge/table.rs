//! Expansion of repeating rows driven by list data.
//!
//! A row is any structural unit the caller hands in, typically a table row of
//! the template markup. When the row's placeholders reference a list
//! (`{{items.name}}` where `items` is an array of objects in the data), the row
//! is duplicated once per list item with that item's fields substituted.
//!
//! Only one list drives a row: the first list referenced in scan order. Other
//! list references in the same row are resolved by field name against the
//! driving list's item and otherwise left verbatim.
//!
//! Substitution works on placeholder tokens across the whole row markup, not
//! only on the scanned text content. Keys are trimmed as everywhere else, so
//! `{{ items.id }}` is filled like `{{items.id}}`, and a list token sitting in
//! markup that has no text content (an attribute, say) is filled as well.

use std::borrow::Cow;

use tracing::debug;

use super::data::MergeData;
use super::flatten::{ArrayTable, ItemRecord};
use super::placeholder::{PLACEHOLDER_PATTERN, placeholders};

/// Outcome of [`expand_row`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowExpansion {
    /// The row has no placeholders; leave it alone.
    Unchanged,
    /// The row only has scalar placeholders; merge it as ordinary text.
    Scalar,
    /// The row referenced `list` and was expanded into `rows` copies.
    ///
    /// An empty list yields empty `markup` and zero rows: the row disappears.
    Expanded {
        /// Name of the list that drove the expansion
        list: String,
        /// Concatenated copies, one per item
        markup: String,
        /// Number of items processed
        rows: usize,
    },
}

impl RowExpansion {
    /// Rows produced by this expansion; zero unless [`RowExpansion::Expanded`].
    #[must_use]
    pub const fn rows_produced(&self) -> usize {
        match self {
            Self::Expanded {
                rows, ..
            } => *rows,
            Self::Unchanged | Self::Scalar => 0,
        }
    }
}

/// Split a placeholder key into `(list, field)` when its prefix names a list.
///
/// The split happens at the last dot, so lists nested in objects work too:
/// `order.lines.sku` refers to field `sku` of list `order.lines`.
#[must_use]
pub fn list_reference<'a>(key: &'a str, arrays: &ArrayTable) -> Option<(&'a str, &'a str)> {
    let (list, field) = key.rsplit_once('.')?;
    (!field.is_empty() && arrays.contains_key(list)).then_some((list, field))
}

/// Expand one row.
///
/// `row_text` is the row's text content as exposed by the markup layer and is
/// what gets scanned for placeholders; `row_markup` is the raw markup that is
/// copied once per list item.
///
/// # Examples
///
/// ```rust
/// use json2doc::merge::{MergeData, RowExpansion, expand_row};
///
/// let data = MergeData::parse(r#"{"items": [{"id": "1"}, {"id": "2"}]}"#).unwrap();
/// let expansion = expand_row("{{items.id}}", "<tr>{{items.id}}</tr>", &data);
/// assert_eq!(expansion.rows_produced(), 2);
/// assert!(matches!(expansion, RowExpansion::Expanded { markup, .. } if markup == "<tr>1</tr><tr>2</tr>"));
/// ```
#[must_use]
pub fn expand_row(row_text: &str, row_markup: &str, data: &MergeData) -> RowExpansion {
    let arrays = data.arrays();
    let mut scanned = placeholders(row_text).peekable();
    if scanned.peek().is_none() {
        return RowExpansion::Unchanged;
    }

    let Some(list) = scanned.find_map(|p| list_reference(p.key, arrays).map(|(list, _)| list))
    else {
        return RowExpansion::Scalar;
    };

    let items = data.array(list).unwrap_or_default();
    let markup: String = items.iter().map(|item| fill_item(row_markup, item, arrays)).collect();

    debug!(list, rows = items.len(), "expanded row");
    RowExpansion::Expanded {
        list: list.to_string(),
        markup,
        rows: items.len(),
    }
}

/// One copy of the row with every list placeholder whose field exists in
/// `item` replaced.
fn fill_item<'a>(row_markup: &'a str, item: &ItemRecord, arrays: &ArrayTable) -> Cow<'a, str> {
    PLACEHOLDER_PATTERN.replace_all(row_markup, |caps: &regex::Captures<'_>| {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        let key = caps.get(1).map_or("", |m| m.as_str().trim());

        list_reference(key, arrays)
            .and_then(|(_, field)| item.get(field))
            .map_or_else(|| whole.to_string(), Clone::clone)
    })
}
