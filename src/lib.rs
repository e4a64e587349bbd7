//! json2doc - merge JSON data into markup templates
//!
//! json2doc fills `{{placeholder}}` tokens in XML-like templates (plain XML,
//! HTML, or the `document.xml` of a word-processing file) with values from a
//! JSON data file. Table rows whose placeholders reference a list of objects
//! are repeated once per item.
//!
//! # Architecture Overview
//!
//! - The data file is flattened once into a scalar table keyed by dotted
//!   paths (`customer.address.city`) and a table of lists of records.
//! - The template is indexed as a markup tree. Rows selected by a path
//!   expression are expanded from the list table, last row first.
//! - The resulting text gets a final scalar substitution pass.
//!
//! Missing data never aborts a merge: unresolved placeholders stay in the
//! output verbatim and are counted. Strict mode turns them into an error.
//!
//! # Core Modules
//!
//! - [`merge`] - Flattening, placeholder scanning, resolution, text merge and
//!   row expansion
//! - [`markup`] - The [`markup::MarkupTree`] abstraction, path expressions and
//!   the XML implementation
//! - [`document`] - Whole-document merges over a markup tree
//! - [`config`] - `json2doc.toml` settings
//! - [`core`] - Error types and user-facing error reporting
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```rust
//! use json2doc::document::{MergeOptions, merge_markup};
//! use json2doc::merge::MergeData;
//!
//! let data = MergeData::parse(r#"{"title": "Q3 report", "meta": {"version": "1.0.0"}}"#)?;
//! let report = merge_markup(
//!     "<doc><h1>{{title}}</h1><p>v{{meta.version}} by {{author}}</p></doc>",
//!     &data,
//!     &MergeOptions::default(),
//! )?;
//!
//! assert_eq!(report.output, "<doc><h1>Q3 report</h1><p>v1.0.0 by {{author}}</p></doc>");
//! assert_eq!(report.stats.missing, 1);
//! # Ok::<(), json2doc::core::Json2DocError>(())
//! ```
//!
//! # Command Line
//!
//! ```bash
//! json2doc merge --doc template.xml --json data.json --output merged.xml
//! json2doc keys --json data.json
//! json2doc vars --doc template.xml
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod document;
pub mod markup;
pub mod merge;

// Test utilities (only compiled for tests)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
