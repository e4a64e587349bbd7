//! The merge engine: data flattening, placeholder substitution and row expansion.
//!
//! # Overview
//!
//! A merge takes a data document and a template and produces the template with
//! every `{{key}}` placeholder replaced by the corresponding data value. The
//! pieces, leaves first:
//!
//! - [`flatten`] turns the data document into a scalar table keyed by dotted
//!   paths (`metadata.version`) and a list table holding the records of every
//!   array of objects.
//! - [`placeholders`] / [`find_all`] scan text for placeholder tokens.
//! - [`resolve`] looks a key up in the scalar table.
//! - [`replace`] substitutes every placeholder in a text and reports
//!   [`MergeStats`].
//! - [`expand_row`] duplicates a template row once per item of the list it
//!   references.
//!
//! [`MergeData`] bundles both tables of one loaded document and is what the
//! document layer passes around.
//!
//! # Values
//!
//! Every value is a string. Numbers, booleans and `null` are kept as the exact
//! text that appeared in the data document:
//!
//! ```rust
//! use json2doc::merge::MergeData;
//!
//! let data = MergeData::parse(r#"{"qty": 3, "paid": false, "note": null}"#).unwrap();
//! assert_eq!(data.get("qty"), Some("3"));
//! assert_eq!(data.get("paid"), Some("false"));
//! assert_eq!(data.get("note"), Some("null"));
//! ```
//!
//! # Missing data
//!
//! Unresolved placeholders are never an error here. They stay in the output
//! verbatim and are counted in [`MergeStats::missing`]; strict checking is the
//! caller's business.

pub mod data;
pub mod flatten;
pub mod placeholder;
pub mod resolver;
pub mod table;
pub mod text;

pub use data::MergeData;
pub use flatten::{ArrayTable, FlatTable, ItemRecord, flatten};
pub use placeholder::{Placeholder, find_all, find_unique, placeholders};
pub use resolver::resolve;
pub use table::{RowExpansion, expand_row, list_reference};
pub use text::{MergeStats, replace};
