//! Merge configuration.
//!
//! Settings come from a TOML file. The first of these that applies is used:
//!
//! 1. the path given with `--config` (or the `JSON2DOC_CONFIG` environment
//!    variable); the file must exist
//! 2. `json2doc.toml` in the current directory
//! 3. `~/.json2doc/config.toml` (`%LOCALAPPDATA%\json2doc\config.toml` on Windows)
//! 4. built-in defaults
//!
//! ```toml
//! # Rows eligible for list expansion
//! row_path = "//*[local-name()='tr']"
//! # Fail when a placeholder stays unresolved
//! strict = false
//! # XML-escape data values before substitution
//! escape_values = true
//! ```
//!
//! Unknown keys are rejected so typos surface instead of being ignored.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::core::Json2DocError;
use crate::markup::PathExpr;

/// Rows in WordprocessingML and HTML tables alike.
pub const DEFAULT_ROW_PATH: &str = "//*[local-name()='tr']";

/// File name looked up in the current directory.
pub const PROJECT_CONFIG_FILE: &str = "json2doc.toml";

/// Settings for the `merge` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    /// Path expression selecting candidate rows.
    pub row_path: String,
    /// Fail on unresolved placeholders.
    pub strict: bool,
    /// Escape markup characters in data values.
    pub escape_values: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            row_path: DEFAULT_ROW_PATH.to_string(),
            strict: false,
            escape_values: true,
        }
    }
}

impl MergeConfig {
    /// Load using the lookup order in the module docs.
    ///
    /// An explicit path has to exist; the implicit locations are skipped when
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed, or if an
    /// explicit path does not exist.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(&path).await;
        }

        let project = PathBuf::from(PROJECT_CONFIG_FILE);
        if project.exists() {
            return Self::load_from(&project).await;
        }

        if let Ok(user) = Self::default_path()
            && user.exists()
        {
            return Self::load_from(&user).await;
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, has
    /// unknown keys, or names an invalid row path.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse TOML text and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`Json2DocError::ConfigError`] for bad TOML or unknown keys and
    /// [`Json2DocError::InvalidPath`] for an unsupported `row_path`.
    pub fn parse(content: &str) -> Result<Self, Json2DocError> {
        let config: Self = toml::from_str(content).map_err(|e| Json2DocError::ConfigError {
            message: e.message().to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that `row_path` is a supported path expression.
    ///
    /// # Errors
    ///
    /// Returns [`Json2DocError::InvalidPath`] otherwise.
    pub fn validate(&self) -> Result<(), Json2DocError> {
        PathExpr::parse(&self.row_path).map(|_| ())
    }

    /// User-level config location.
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory is unknown.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("json2doc")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".json2doc")
        };

        Ok(config_dir.join("config.toml"))
    }
}
