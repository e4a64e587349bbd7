//! The `merge` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::debug;

use super::CliConfig;
use super::common::{read_text, write_text};
use crate::config::MergeConfig;
use crate::document::{MergeOptions, MergeReport, merge_markup};
use crate::merge::MergeData;

/// Merge a JSON data file into a markup template.
///
/// The merged document goes to `--output` or, without it, to stdout. A short
/// summary is printed to stderr unless `--quiet` is set.
#[derive(Args, Debug)]
pub struct MergeCommand {
    /// Template file containing {{placeholders}}
    #[arg(short = 'd', long = "doc", value_name = "TEMPLATE")]
    pub doc: PathBuf,

    /// JSON data file
    #[arg(short = 'j', long = "json", value_name = "DATA")]
    pub json: PathBuf,

    /// Where to write the merged document (stdout when omitted)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path expression selecting the rows to expand
    #[arg(long, value_name = "EXPR")]
    pub row_path: Option<String>,

    /// Fail if any placeholder stays unresolved
    #[arg(long)]
    pub strict: bool,
}

impl MergeCommand {
    /// Run the merge.
    ///
    /// # Errors
    ///
    /// Fails on unreadable inputs, malformed data or markup, an invalid row
    /// path, unresolved placeholders in strict mode, or an unwritable output.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let merge_config = MergeConfig::load_with_optional(config.config_path.clone()).await?;
        let options = self.options(&merge_config);
        debug!(?options, "merge options");

        let data = MergeData::load(&self.json).await?;
        let template = read_text(&self.doc, "template").await?;
        let report = merge_markup(&template, &data, &options)?;

        match &self.output {
            Some(path) => write_text(path, &report.output).await?,
            None => print!("{}", report.output),
        }

        if !config.quiet {
            self.print_summary(&report);
        }
        Ok(())
    }

    /// Config file settings with the command-line overrides applied.
    #[must_use]
    pub fn options(&self, config: &MergeConfig) -> MergeOptions {
        let mut options = MergeOptions::from(config);
        if let Some(row_path) = &self.row_path {
            options.row_path.clone_from(row_path);
        }
        options.strict |= self.strict;
        options
    }

    fn print_summary(&self, report: &MergeReport) {
        let target = self
            .output
            .as_ref()
            .map_or_else(|| "stdout".to_string(), |p| p.display().to_string());
        eprintln!(
            "{} Merged {} into {}",
            "✓".green(),
            self.json.display(),
            target.bold()
        );
        eprintln!("  Rows created: {}", report.rows_created);

        let missing = if report.stats.missing == 0 {
            report.stats.missing.to_string().normal()
        } else {
            report.stats.missing.to_string().yellow()
        };
        eprintln!(
            "  Placeholders: {} found, {} replaced, {} missing",
            report.stats.found, report.stats.replaced, missing
        );
        if !report.unresolved.is_empty() {
            eprintln!("  {}: {}", "Unresolved".yellow(), report.unresolved.join(", "));
        }
    }
}
