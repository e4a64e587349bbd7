//! Loaded merge data: the two flattened tables of one data document.

use std::path::Path;

use anyhow::Result;
use tokio::fs;
use tracing::{debug, info};

use super::flatten::{ArrayTable, FlatTable, ItemRecord, flatten};
use super::resolver::resolve;
use crate::core::Json2DocError;

/// The flattened content of one data document.
///
/// Built once per document and read-only afterwards; every merge call borrows
/// it, so one instance can serve any number of sequential merges.
///
/// # Examples
///
/// ```rust
/// use json2doc::merge::MergeData;
///
/// let data = MergeData::parse(r#"{"name": "Ann", "items": [{"id": 1}]}"#).unwrap();
/// assert_eq!(data.get("name"), Some("Ann"));
/// assert!(data.has_key("items"));
/// assert_eq!(data.array("items").map(<[_]>::len), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeData {
    values: FlatTable,
    arrays: ArrayTable,
}

impl MergeData {
    /// Flatten a data document held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`Json2DocError::MalformedInput`] if the text is not an object.
    pub fn parse(text: &str) -> Result<Self, Json2DocError> {
        let (values, arrays) = flatten(text)?;
        debug!(values = values.len(), lists = arrays.len(), "flattened data document");
        Ok(Self::from_tables(values, arrays))
    }

    /// Read and flatten a data file.
    ///
    /// # Errors
    ///
    /// Returns [`Json2DocError::FileSystemError`] if the file cannot be read and
    /// [`Json2DocError::MalformedInput`] if its content is not an object.
    pub async fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).await.map_err(|e| Json2DocError::FileSystemError {
                operation: "read data file".to_string(),
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        // Editors on Windows often save JSON with a byte order mark
        let data = Self::parse(text.strip_prefix('\u{feff}').unwrap_or(&text))?;
        info!("Loaded {} values and {} lists from {}", data.len(), data.arrays.len(), path.display());
        Ok(data)
    }

    /// Build directly from already flattened tables.
    #[must_use]
    pub const fn from_tables(values: FlatTable, arrays: ArrayTable) -> Self {
        Self {
            values,
            arrays,
        }
    }

    /// The scalar table.
    #[must_use]
    pub const fn values(&self) -> &FlatTable {
        &self.values
    }

    /// The list table.
    #[must_use]
    pub const fn arrays(&self) -> &ArrayTable {
        &self.arrays
    }

    /// Resolve a key; empty values count as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        resolve(key, &self.values)
    }

    /// Whether `key` resolves to a non-empty value.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Every scalar key in discovery order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Item records of a list.
    #[must_use]
    pub fn array(&self, name: &str) -> Option<&[ItemRecord]> {
        self.arrays.get(name).map(Vec::as_slice)
    }

    /// Every list name in discovery order.
    pub fn list_names(&self) -> impl Iterator<Item = &str> {
        self.arrays.keys().map(String::as_str)
    }

    /// Number of scalar keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing was flattened.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.arrays.is_empty()
    }

    /// A copy with `f` applied to every scalar and every item field.
    #[must_use]
    pub fn map_values<F>(&self, f: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        let values = self.values.iter().map(|(k, v)| (k.clone(), f(v))).collect();
        let arrays = self
            .arrays
            .iter()
            .map(|(name, items)| {
                let items = items
                    .iter()
                    .map(|item| item.iter().map(|(k, v)| (k.clone(), f(v))).collect())
                    .collect();
                (name.clone(), items)
            })
            .collect();

        Self::from_tables(values, arrays)
    }
}
