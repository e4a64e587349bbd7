//! json2doc CLI entry point
//!
//! Parses the command line, runs the selected command and turns failures
//! into a readable message with a suggestion before exiting with status 1.

use anyhow::Result;
use clap::Parser;
use json2doc::cli;
use json2doc::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
