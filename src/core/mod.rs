//! Core types for json2doc
//!
//! This module holds the error types shared by every other module:
//! - [`Json2DocError`] - enumerated error types covering all hard failures
//! - [`ErrorContext`] - user-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - convert any `anyhow::Error` to user-friendly format
//!
//! # Example
//!
//! ```rust
//! use json2doc::core::{Json2DocError, ErrorContext};
//!
//! let ctx = ErrorContext::new(Json2DocError::StaleNode)
//!     .with_suggestion("Re-select the rows after replacing them");
//! assert!(ctx.to_string().contains("Re-select"));
//! ```

pub mod error;

pub use error::{ErrorContext, Json2DocError, user_friendly_error};
