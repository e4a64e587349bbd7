//! Integration test suite for json2doc
//!
//! End-to-end tests that run the `json2doc` binary against files in a
//! temporary directory.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **merge**: the `merge` command, row expansion, strict mode and config
//! - **inspect**: the `keys` and `vars` commands
//! - **error_scenarios**: failure reporting and exit codes

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod error_scenarios;
mod inspect;
mod merge;
