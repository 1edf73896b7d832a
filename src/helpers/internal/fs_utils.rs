//! Common filesystem utilities
//!
//! Provides shared filesystem operations used across multiple helpers.

use crate::error::{Error, Result};
use std::path::Path;

/// Ensure a file's parent directory exists.
///
/// Creates the parent directory (and all ancestors) if it doesn't exist.
///
/// # Example
/// ```ignore
/// ensure_parent_dir(Path::new("/foo/bar/baz.txt")).await?;
/// // /foo/bar/ now exists
/// ```
pub async fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| Error::Io {
                    op: "mkdir",
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
    }
    Ok(())
}

/// Copy a file, creating parent directories as needed.
pub async fn copy_file(src: &Path, dest: &Path) -> Result<u64> {
    ensure_parent_dir(dest).await?;
    tokio::fs::copy(src, dest)
        .await
        .map_err(|source| Error::Copy {
            src: src.to_path_buf(),
            dst: dest.to_path_buf(),
            source,
        })
}

/// Get the basename (filename) of a path
pub fn basename(path: &Path) -> Option<&std::ffi::OsStr> {
    path.file_name()
}

/// Quote a string for a POSIX shell using single quotes.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
