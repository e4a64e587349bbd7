//! The `keys` command.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::common::OutputFormat;
use crate::merge::MergeData;

/// List every flattened key of a JSON data file, and its lists.
#[derive(Args, Debug)]
pub struct KeysCommand {
    /// JSON data file
    #[arg(short = 'j', long = "json", value_name = "DATA")]
    pub json: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl KeysCommand {
    /// Print the keys.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not a JSON object.
    pub async fn execute(self) -> Result<()> {
        let data = MergeData::load(&self.json).await?;
        print!("{}", render(&data, self.format)?);
        Ok(())
    }
}

/// Render the listing in the requested format.
fn render(data: &MergeData, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let listing = serde_json::json!({
                "values": data.values(),
                "lists": data.arrays(),
            });
            Ok(format!("{}\n", serde_json::to_string_pretty(&listing)?))
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for (key, value) in data.values() {
                // Raw array text is listed under "Lists" instead
                if data.array(key).is_some() {
                    continue;
                }
                writeln!(out, "{} = {}", key.cyan(), value)?;
            }
            if data.list_names().next().is_some() {
                writeln!(out, "\n{}", "Lists:".bold())?;
                for (name, items) in data.arrays() {
                    let noun = if items.len() == 1 { "item" } else { "items" };
                    writeln!(out, "  {} ({} {noun})", name.cyan(), items.len())?;
                }
            }
            Ok(out)
        }
    }
}
