//! The `vars` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::common::{OutputFormat, read_text};
use crate::merge::{find_all, find_unique};

/// List the placeholders of a template.
#[derive(Args, Debug)]
pub struct VarsCommand {
    /// Template file
    #[arg(short = 'd', long = "doc", value_name = "TEMPLATE")]
    pub doc: PathBuf,

    /// Keep every occurrence instead of the first of each name
    #[arg(long)]
    pub all: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl VarsCommand {
    /// Print the placeholder names.
    ///
    /// # Errors
    ///
    /// Fails when the template cannot be read.
    pub async fn execute(self) -> Result<()> {
        let template = read_text(&self.doc, "template").await?;
        print!("{}", self.render(&template)?);
        Ok(())
    }

    fn render(&self, template: &str) -> Result<String> {
        let names = if self.all {
            find_all(template)
        } else {
            find_unique(template)
        };

        Ok(match self.format {
            OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&names)?),
            OutputFormat::Text => names.iter().map(|name| format!("{name}\n")).collect(),
        })
    }
}
