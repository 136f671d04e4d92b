//! Filesystem access for documents converted by zp.
//!
//! - [`Scanner`] discovers markdown files under a source directory.
//! - [`read_lines`] and [`write_lines`] move documents between disk and the
//!   line sequences the converter works on.

mod scanner;

use std::fs;
use std::path::{Path, PathBuf};

pub use scanner::Scanner;

/// Error reading or writing a document.
#[derive(Debug, thiserror::Error)]
#[error("{}: {source}", .path.display())]
pub struct StorageError {
    /// Document path.
    pub path: PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}

impl StorageError {
    fn new(path: &Path, source: std::io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read a document as lines.
///
/// Line terminators (`\n` or `\r\n`) are stripped.
///
/// # Errors
///
/// Returns [`StorageError`] if the file cannot be read or is not UTF-8.
pub fn read_lines(path: &Path) -> Result<Vec<String>, StorageError> {
    let content = fs::read_to_string(path).map_err(|e| StorageError::new(path, e))?;
    Ok(content.lines().map(str::to_owned).collect())
}

/// Write a document, terminating every line with `\n`.
///
/// # Errors
///
/// Returns [`StorageError`] if the file cannot be written.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<(), StorageError> {
    let mut content = String::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }
    fs::write(path, content).map_err(|e| StorageError::new(path, e))?;
    tracing::debug!(path = %path.display(), lines = lines.len(), "Wrote document");
    Ok(())
}
