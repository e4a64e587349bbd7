//! Common test utilities for json2doc integration tests

// Allow dead code because these utilities are used across different test files
// and not all utilities are used in every test file
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory holding the inputs and outputs of one test
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
}

impl TestProject {
    /// Create an empty project directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        fs::create_dir_all(&project_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// Get the project directory path
    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    /// Write a file relative to the project directory
    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.project_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Read a file relative to the project directory
    pub fn read_file(&self, relative: &str) -> Result<String> {
        let path = self.project_dir.join(relative);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// A json2doc command running inside the project directory, isolated from
    /// the caller's logging and config environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("json2doc").unwrap();
        cmd.current_dir(&self.project_dir)
            .env("NO_COLOR", "1")
            .env("HOME", &self.project_dir)
            .env_remove("RUST_LOG")
            .env_remove("JSON2DOC_CONFIG");
        cmd
    }
}

/// Scalar data used by several tests
pub const SIMPLE_DATA: &str = r#"{
  "title": "Sample Document",
  "author": "John Doe",
  "metadata": {"version": "1.0.0", "status": "draft"}
}"#;

/// Template matching [`SIMPLE_DATA`]
pub const SIMPLE_TEMPLATE: &str = "<document>
  <p>Title: {{title}}</p>
  <p>Author: {{author}}</p>
  <p>Version: {{metadata.version}} ({{metadata.status}})</p>
</document>";

/// Invoice data with a list of line items
pub const INVOICE_DATA: &str = r#"{
  "invoice": "INV-042",
  "customer": {"name": "Smith & Sons"},
  "items": [
    {"name": "Widget", "qty": 2},
    {"name": "Gadget", "qty": 1},
    {"name": "Doohickey", "qty": 10}
  ]
}"#;

/// WordprocessingML-style invoice template with one repeating row
pub const INVOICE_TEMPLATE: &str = r#"<w:document xmlns:w="urn:w"><w:body>
<w:p><w:r><w:t>Invoice {{invoice}} for {{customer.name}}</w:t></w:r></w:p>
<w:tbl>
<w:tr><w:tc><w:t>Item</w:t></w:tc><w:tc><w:t>Qty</w:t></w:tc></w:tr>
<w:tr><w:tc><w:t>{{items.name}}</w:t></w:tc><w:tc><w:t>{{items.qty}}</w:t></w:tc></w:tr>
</w:tbl>
</w:body></w:document>"#;
