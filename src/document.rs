//! Whole-document merge over a [`MarkupTree`].
//!
//! A document merge runs in two passes:
//!
//! 1. Every node selected by the row path is offered to [`expand_row`]. Rows
//!    that reference a list are replaced by one copy per list item (or removed
//!    when the list is empty). Rows are visited last to first so a
//!    replacement never moves a row that is still waiting.
//! 2. The serialized tree goes through [`replace`] for the remaining scalar
//!    placeholders.
//!
//! # Examples
//!
//! ```rust
//! use json2doc::document::{MergeOptions, merge_markup};
//! use json2doc::merge::MergeData;
//!
//! let data = MergeData::parse(
//!     r#"{"customer": "Ann", "items": [{"sku": "A-1"}, {"sku": "B-2"}]}"#,
//! ).unwrap();
//! let template = "<doc><p>{{customer}}</p><tbl><tr><td>{{items.sku}}</td></tr></tbl></doc>";
//!
//! let report = merge_markup(template, &data, &MergeOptions::default()).unwrap();
//! assert_eq!(
//!     report.output,
//!     "<doc><p>Ann</p><tbl><tr><td>A-1</td></tr><tr><td>B-2</td></tr></tbl></doc>"
//! );
//! assert_eq!(report.rows_created, 2);
//! assert_eq!(report.stats.missing, 0);
//! ```

use quick_xml::escape::escape;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{DEFAULT_ROW_PATH, MergeConfig};
use crate::core::Json2DocError;
use crate::markup::{MarkupTree, XmlDocument};
use crate::merge::{MergeData, MergeStats, RowExpansion, expand_row, find_unique, replace, resolve};

/// Knobs for one document merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// Path selecting the candidate rows
    pub row_path: String,
    /// Escape `<`, `>`, `&` and quotes in data values before substitution
    pub escape_values: bool,
    /// Fail when any placeholder stays unresolved
    pub strict: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            row_path: DEFAULT_ROW_PATH.to_string(),
            escape_values: true,
            strict: false,
        }
    }
}

impl From<&MergeConfig> for MergeOptions {
    fn from(config: &MergeConfig) -> Self {
        Self {
            row_path: config.row_path.clone(),
            escape_values: config.escape_values,
            strict: config.strict,
        }
    }
}

/// Result of a document merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// The merged document text
    pub output: String,
    /// Rows produced by list expansion, summed over every expanded row
    pub rows_created: usize,
    /// Counters of the scalar pass
    pub stats: MergeStats,
    /// Distinct placeholder names left in the output, first occurrence first
    pub unresolved: Vec<String>,
}

impl MergeReport {
    /// Fail with [`Json2DocError::UnresolvedPlaceholders`] unless every
    /// placeholder was resolved.
    ///
    /// # Errors
    ///
    /// Returns the error when `stats.missing > 0`.
    pub fn ensure_complete(&self) -> Result<(), Json2DocError> {
        if self.stats.is_complete() {
            return Ok(());
        }
        Err(Json2DocError::UnresolvedPlaceholders {
            count: self.stats.missing,
            names: self.unresolved.clone(),
        })
    }
}

/// Expand every list row selected by `row_path`, last row first.
///
/// Returns the number of rows created.
///
/// # Errors
///
/// Propagates path and node errors from the tree.
pub fn expand_rows<T: MarkupTree>(
    tree: &mut T,
    data: &MergeData,
    row_path: &str,
) -> Result<usize, Json2DocError> {
    let rows = tree.select(row_path)?;
    debug!(candidates = rows.len(), row_path, "selected rows");

    let mut created = 0;
    for node in rows.into_iter().rev() {
        let text = tree.text_content(node)?;
        let markup = tree.node_markup(node)?;

        if let RowExpansion::Expanded {
            markup, rows, ..
        } = expand_row(&text, &markup, data)
        {
            tree.replace_node(node, &markup)?;
            created += rows;
        }
    }
    Ok(created)
}

/// Merge `data` into an already parsed tree.
///
/// The tree is left holding the expanded rows; the scalar pass only affects
/// the returned output.
///
/// # Errors
///
/// Returns tree errors, and [`Json2DocError::UnresolvedPlaceholders`] in
/// strict mode when anything stays unresolved.
pub fn merge_document<T: MarkupTree>(
    tree: &mut T,
    data: &MergeData,
    options: &MergeOptions,
) -> Result<MergeReport, Json2DocError> {
    let escaped;
    let data = if options.escape_values {
        escaped = data.map_values(|value| escape(value).into_owned());
        &escaped
    } else {
        data
    };

    let rows_created = expand_rows(tree, data, &options.row_path)?;

    let serialized = tree.serialize();
    let (output, stats) = replace(&serialized, data.values());
    let unresolved: Vec<String> = find_unique(&serialized)
        .into_iter()
        .filter(|key| resolve(key, data.values()).is_none())
        .collect();

    info!(
        rows_created,
        found = stats.found,
        replaced = stats.replaced,
        missing = stats.missing,
        "merged document"
    );

    let report = MergeReport {
        output,
        rows_created,
        stats,
        unresolved,
    };
    if options.strict {
        report.ensure_complete()?;
    }
    Ok(report)
}

/// Parse `template` as XML and merge `data` into it.
///
/// # Errors
///
/// Returns [`Json2DocError::MarkupParse`] for malformed templates, otherwise
/// as [`merge_document`].
pub fn merge_markup(
    template: &str,
    data: &MergeData,
    options: &MergeOptions,
) -> Result<MergeReport, Json2DocError> {
    let mut document = XmlDocument::parse(template)?;
    merge_document(&mut document, data, options)
}
