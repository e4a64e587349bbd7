//! Command-line interface for json2doc.
//!
//! # Commands
//!
//! - `merge` - Merge a JSON data file into a markup template
//! - `keys` - List the flattened keys and lists of a data file
//! - `vars` - List the placeholders of a template
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Only log errors and skip the merge summary
//! - `--config` - Path to a config file (also `JSON2DOC_CONFIG`)
//!
//! `RUST_LOG`, when set, takes precedence over `--verbose` and `--quiet` for
//! log filtering.
//!
//! # Examples
//!
//! ```bash
//! # Merge into a file
//! json2doc merge --doc template.xml --json data.json --output result.xml
//!
//! # Fail instead of leaving {{placeholders}} behind
//! json2doc merge -d template.xml -j data.json --strict
//!
//! # Inspect inputs
//! json2doc keys --json data.json --format json
//! json2doc vars --doc template.xml --all
//! ```

pub mod common;
mod keys;
mod merge;
mod vars;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub use common::OutputFormat;
pub use keys::KeysCommand;
pub use merge::MergeCommand;
pub use vars::VarsCommand;

/// Runtime configuration derived from the global flags.
///
/// Commands receive this instead of reading the flags themselves, which keeps
/// them callable from tests without going through argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Suppress informational output
    pub quiet: bool,
    /// Explicit config file
    pub config_path: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            quiet: false,
            config_path: None,
        }
    }
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the config file path.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Build the log filter: `RUST_LOG` if set, else [`Self::log_level`].
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Main CLI structure for json2doc.
#[derive(Parser, Debug)]
#[command(
    name = "json2doc",
    about = "Merge JSON data into markup templates",
    version,
    long_about = "json2doc replaces {{placeholders}} in XML-like templates with values from a JSON \
                  file and repeats table rows once per item of the lists they reference."
)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a config file
    #[arg(short, long, global = true, env = "JSON2DOC_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge a JSON data file into a template
    Merge(MergeCommand),

    /// List the keys and lists found in a JSON data file
    Keys(KeysCommand),

    /// List the placeholders used by a template
    Vars(VarsCommand),
}

impl Cli {
    /// Set up logging and run the selected command.
    ///
    /// # Errors
    ///
    /// Returns whatever the command fails with.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            quiet: self.quiet,
            config_path: self.config.clone(),
        }
    }

    /// Run the selected command with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns whatever the command fails with.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Merge(cmd) => cmd.execute(&config).await,
            Commands::Keys(cmd) => cmd.execute().await,
            Commands::Vars(cmd) => cmd.execute().await,
        }
    }
}
