//! Test fixtures for data files and templates
//!
//! Each fixture pairs a file name with its content so tests can write it into
//! a temporary directory and point the merge at it.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// A JSON data file.
#[derive(Clone, Debug)]
pub struct DataFixture {
    pub name: String,
    pub content: String,
}

impl DataFixture {
    /// Flat and nested scalars, no lists
    pub fn simple() -> Self {
        Self {
            name: "data.json".to_string(),
            content: r#"{
  "title": "Sample Document",
  "author": "John Doe",
  "date": "2024-01-15",
  "metadata": {
    "version": "1.0.0",
    "status": "draft"
  }
}"#
            .to_string(),
        }
    }

    /// An invoice with a customer object and a list of line items
    pub fn invoice() -> Self {
        Self {
            name: "invoice.json".to_string(),
            content: r#"{
  "invoice": "INV-042",
  "customer": {"name": "Smith & Sons", "city": "Lisbon"},
  "items": [
    {"name": "Widget", "qty": 2, "price": "9.50"},
    {"name": "Gadget", "qty": 1, "price": "24.00"},
    {"name": "Doohickey", "qty": 10, "price": "0.75"}
  ],
  "total": "51.50"
}"#
            .to_string(),
        }
    }

    /// An invoice whose list is empty
    pub fn empty_items() -> Self {
        Self {
            name: "empty.json".to_string(),
            content: r#"{"invoice": "INV-000", "items": []}"#.to_string(),
        }
    }

    /// A top-level array, which is not accepted
    pub fn malformed() -> Self {
        Self {
            name: "malformed.json".to_string(),
            content: r#"[{"name": "x"}]"#.to_string(),
        }
    }

    /// Write the data file to a directory
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.name);
        fs::write(&path, &self.content)?;
        Ok(path)
    }
}

/// A markup template.
#[derive(Clone, Debug)]
pub struct TemplateFixture {
    pub name: String,
    pub content: String,
}

impl TemplateFixture {
    /// Paragraphs with scalar placeholders
    pub fn simple() -> Self {
        Self {
            name: "template.xml".to_string(),
            content: r#"<document>
  <p>Title: {{title}}</p>
  <p>Author: {{author}}</p>
  <p>Version: {{metadata.version}}</p>
</document>"#
                .to_string(),
        }
    }

    /// A WordprocessingML body with a header row and one item row
    pub fn invoice() -> Self {
        Self {
            name: "invoice.xml".to_string(),
            content: r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Invoice {{invoice}} for {{customer.name}}, {{customer.city}}</w:t></w:r></w:p>
    <w:tbl>
      <w:tr><w:tc><w:p><w:r><w:t>Item</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Qty</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Price</w:t></w:r></w:p></w:tc></w:tr>
      <w:tr><w:tc><w:p><w:r><w:t>{{items.name}}</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>{{items.qty}}</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>{{items.price}}</w:t></w:r></w:p></w:tc></w:tr>
    </w:tbl>
    <w:p><w:r><w:t>Total: {{total}}</w:t></w:r></w:p>
  </w:body>
</w:document>"#
                .to_string(),
        }
    }

    /// Write the template to a directory
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.name);
        fs::write(&path, &self.content)?;
        Ok(path)
    }
}
