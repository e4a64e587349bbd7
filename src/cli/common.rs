//! Helpers shared by the subcommands.

use std::path::Path;

use anyhow::Result;
use tokio::fs;

use crate::core::Json2DocError;

/// Output format of the inspection commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// JSON for scripts
    Json,
}

/// Read a whole text file, reporting failures as [`Json2DocError::FileSystemError`].
///
/// # Errors
///
/// Returns the error when the file cannot be read as UTF-8 text.
pub async fn read_text(path: &Path, what: &str) -> Result<String> {
    let text = fs::read_to_string(path).await.map_err(|e| Json2DocError::FileSystemError {
        operation: format!("read {what}"),
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(text)
}

/// Write a text file, creating missing parent directories.
///
/// # Errors
///
/// Returns [`Json2DocError::FileSystemError`] when a directory or the file
/// cannot be written.
pub async fn write_text(path: &Path, content: &str) -> Result<()> {
    let fs_error = |operation: &str, e: std::io::Error| Json2DocError::FileSystemError {
        operation: operation.to_string(),
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await.map_err(|e| fs_error("create output directory", e))?;
    }
    fs::write(path, content).await.map_err(|e| fs_error("write output file", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parents_and_read_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/nested/result.xml");

        write_text(&path, "<a/>").await.unwrap();
        assert_eq!(read_text(&path, "output").await.unwrap(), "<a/>");
    }

    #[tokio::test]
    async fn test_read_missing_names_the_operation() {
        let dir = TempDir::new().unwrap();
        let err = read_text(&dir.path().join("nope.xml"), "template").await.unwrap_err();
        match err.downcast_ref::<Json2DocError>() {
            Some(Json2DocError::FileSystemError {
                operation, path, ..
            }) => {
                assert_eq!(operation, "read template");
                assert!(path.ends_with("nope.xml"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
