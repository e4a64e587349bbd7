//! Error handling for json2doc
//!
//! This module provides the error types and user-friendly error reporting for
//! json2doc. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`Json2DocError`] - Enumerated error types for every hard failure
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! Unresolved placeholders are not errors in the merge core: they survive
//! verbatim in the output and are counted in `MergeStats::missing`. Only strict
//! mode turns them into [`Json2DocError::UnresolvedPlaceholders`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use json2doc::core::{Json2DocError, ErrorContext, user_friendly_error};
//!
//! fn load() -> Result<(), Json2DocError> {
//!     Err(Json2DocError::MalformedInput {
//!         reason: "expected '{'".to_string(),
//!     })
//! }
//!
//! if let Err(e) = load() {
//!     let ctx = user_friendly_error(anyhow::Error::from(e));
//!     ctx.display();
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for json2doc operations.
///
/// # Error Categories
///
/// ## Data loading
/// - [`MalformedInput`] - data text does not start with an object
///
/// ## Markup handling
/// - [`MarkupParse`] - template markup could not be parsed
/// - [`InvalidPath`] - row selection path is not understood
/// - [`StaleNode`] - a node handle refers to a replaced element
///
/// ## Merge policy
/// - [`UnresolvedPlaceholders`] - strict mode found missing data
///
/// ## Environment
/// - [`FileSystemError`] - reading or writing a file failed
/// - [`ConfigError`] - configuration file issues
/// - [`Other`] - anything not covered above
///
/// [`MalformedInput`]: Json2DocError::MalformedInput
/// [`MarkupParse`]: Json2DocError::MarkupParse
/// [`InvalidPath`]: Json2DocError::InvalidPath
/// [`StaleNode`]: Json2DocError::StaleNode
/// [`UnresolvedPlaceholders`]: Json2DocError::UnresolvedPlaceholders
/// [`FileSystemError`]: Json2DocError::FileSystemError
/// [`ConfigError`]: Json2DocError::ConfigError
/// [`Other`]: Json2DocError::Other
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Json2DocError {
    /// Data text does not begin with an object-opening brace.
    ///
    /// This is the only hard failure of the flattener. Inconsistencies inside
    /// nested structures degrade to "nothing extracted for that branch".
    #[error("Malformed input data: {reason}")]
    MalformedInput {
        /// What was found instead of an object
        reason: String,
    },

    /// Template markup could not be parsed into a tree.
    #[error("Failed to parse template markup: {reason}")]
    MarkupParse {
        /// Parser message, including the byte position when known
        reason: String,
    },

    /// A node selection path uses syntax the markup layer does not support.
    #[error("Invalid node path '{path}': {reason}")]
    InvalidPath {
        /// The path expression as given
        path: String,
        /// Why it was rejected
        reason: String,
    },

    /// A node handle refers to an element that has already been replaced.
    #[error("Node handle refers to an element that was already replaced")]
    StaleNode,

    /// Strict mode: the merge left placeholders without data.
    #[error("{count} placeholder(s) could not be resolved")]
    UnresolvedPlaceholders {
        /// Number of unresolved occurrences
        count: usize,
        /// Distinct unresolved placeholder names, in document order
        names: Vec<String>,
    },

    /// File system operation failed.
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// The operation that failed (e.g. "read data file")
        operation: String,
        /// The path involved
        path: String,
        /// Underlying error message
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information.
///
/// Wraps a [`Json2DocError`] with an optional suggestion and optional details,
/// and knows how to print itself to a terminal with colors.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: Json2DocError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: Json2DocError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    ///
    /// Suggestions are displayed in green to draw attention.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Known [`Json2DocError`] values get tailored suggestions, even when wrapped
/// in `anyhow` context. Anything else is reported with the full context chain
/// as details.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(known) = error.downcast_ref::<Json2DocError>() {
        return create_error_context(known);
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        return ErrorContext::new(Json2DocError::FileSystemError {
            operation: "file access".to_string(),
            path: "unknown".to_string(),
            reason: io_error.to_string(),
        })
        .with_suggestion("Check that the file exists and that you have permission to access it");
    }

    ErrorContext::new(Json2DocError::Other {
        message: error.to_string(),
    })
    .with_details(format!("{error:#}"))
}

fn create_error_context(error: &Json2DocError) -> ErrorContext {
    let ctx = ErrorContext::new(error.clone());
    match error {
        Json2DocError::MalformedInput { .. } => ctx
            .with_suggestion("Make sure the data file is a JSON object, starting with '{'")
            .with_details("Top-level arrays and bare values cannot be merged into a template"),
        Json2DocError::MarkupParse { .. } => ctx
            .with_suggestion("Check the template for unclosed or mismatched tags")
            .with_details("The template must be well-formed markup for row expansion to work"),
        Json2DocError::InvalidPath { .. } => ctx.with_suggestion(
            "Use a path such as //tr, /document/body/tbl/tr or //*[local-name()='tr']",
        ),
        Json2DocError::StaleNode => ctx
            .with_details("Rows must be replaced in reverse document order or re-selected"),
        Json2DocError::UnresolvedPlaceholders { names, .. } => ctx
            .with_suggestion("Add the missing keys to the data file or drop --strict")
            .with_details(format!("Unresolved: {}", names.join(", "))),
        Json2DocError::FileSystemError { reason, .. } => ctx
            .with_suggestion("Check that the path is correct and readable")
            .with_details(reason.clone()),
        Json2DocError::ConfigError { .. } => {
            ctx.with_suggestion("Check json2doc.toml for unknown keys or wrong value types")
        }
        Json2DocError::Other { .. } => ctx,
    }
}
