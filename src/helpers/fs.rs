//! Filesystem operation helpers
//!
//! Cleaning directories by pattern, removing paths and copying files into
//! a destination tree.

use super::cmd::{ExecOptions, exec};
use super::internal::fs_utils::{basename, copy_file, shell_quote};
use crate::error::{Error, Result};
use crate::output;
use futures::future::try_join_all;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Depth used by [`clean`] when none is given.
pub const DEFAULT_CLEAN_DEPTH: u32 = 1;

/// Build the `find` command used by [`clean`].
pub fn clean_command(dir: &Path, pattern: &str, depth: Option<u32>) -> String {
    format!(
        "find {} -maxdepth {} -type f -name {} -delete",
        shell_quote(&dir.to_string_lossy()),
        depth.unwrap_or(DEFAULT_CLEAN_DEPTH),
        shell_quote(pattern)
    )
}

/// Delete regular files in `dir` matching `pattern`, down to `depth` levels.
///
/// Directories are left in place. Fails with the stderr of `find` when the
/// directory is missing or unreadable.
pub async fn clean(
    dir: impl AsRef<Path>,
    pattern: &str,
    depth: Option<u32>,
    opts: &ExecOptions,
) -> Result<()> {
    exec(&clean_command(dir.as_ref(), pattern, depth), opts).await?;
    Ok(())
}

/// Remove a file or directory tree. A missing path is not an error.
pub async fn rm(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let meta = match tokio::fs::symlink_metadata(path).await {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(Error::Io {
                op: "rm",
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let removed = if meta.is_dir() {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    };

    match removed {
        Ok(()) => {
            output::detail(&format!("rm {}", path.display()));
            Ok(())
        }
        // Raced with another remover
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(Error::Io {
            op: "rm",
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// A file to copy: a bare source path, or a source with an explicit
/// destination relative to the copy target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CopySpec {
    Path(PathBuf),
    Pair { src: PathBuf, dst: PathBuf },
}

impl CopySpec {
    pub fn src(&self) -> &Path {
        match self {
            CopySpec::Path(src) => src,
            CopySpec::Pair { src, .. } => src,
        }
    }

    /// Where this spec lands under `dest`.
    pub fn target(&self, dest: &Path) -> PathBuf {
        match self {
            CopySpec::Path(src) => match basename(src) {
                Some(name) => dest.join(name),
                None => dest.to_path_buf(),
            },
            CopySpec::Pair { dst, .. } => dest.join(dst),
        }
    }

    /// Parse a JSON value that is a spec or a list of specs.
    ///
    /// Every entry is validated before anything is returned.
    pub fn parse_json(value: &serde_json::Value) -> Result<Vec<CopySpec>> {
        let items = match value {
            serde_json::Value::Array(items) => items.as_slice(),
            single => std::slice::from_ref(single),
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                CopySpec::deserialize(item).map_err(|_| Error::InvalidCopySpec {
                    index,
                    found: item.to_string(),
                })
            })
            .collect()
    }
}

impl From<&str> for CopySpec {
    fn from(src: &str) -> Self {
        CopySpec::Path(PathBuf::from(src))
    }
}

impl From<String> for CopySpec {
    fn from(src: String) -> Self {
        CopySpec::Path(PathBuf::from(src))
    }
}

impl From<&Path> for CopySpec {
    fn from(src: &Path) -> Self {
        CopySpec::Path(src.to_path_buf())
    }
}

impl From<PathBuf> for CopySpec {
    fn from(src: PathBuf) -> Self {
        CopySpec::Path(src)
    }
}

impl<S: Into<PathBuf>, D: Into<PathBuf>> From<(S, D)> for CopySpec {
    fn from((src, dst): (S, D)) -> Self {
        CopySpec::Pair {
            src: src.into(),
            dst: dst.into(),
        }
    }
}

/// Copy files into `dest`, creating directories as needed.
///
/// All copies run concurrently. The first failure is returned and the
/// remaining copies are dropped without being awaited.
///
/// # Example
/// ```ignore
/// copy(["LICENSE", "README.md"], "dist").await?;
/// copy([("assets/app.css", "css/app.css")], "dist").await?;
/// ```
pub async fn copy<I>(specs: I, dest: impl AsRef<Path>) -> Result<()>
where
    I: IntoIterator,
    I::Item: Into<CopySpec>,
{
    let dest = dest.as_ref();
    let jobs = specs.into_iter().map(Into::into).map(|spec: CopySpec| {
        let target = spec.target(dest);
        async move {
            copy_file(spec.src(), &target).await?;
            output::detail(&format!(
                "cp {} -> {}",
                spec.src().display(),
                target.display()
            ));
            Ok::<_, Error>(())
        }
    });
    try_join_all(jobs).await?;
    Ok(())
}

/// Copy files described by JSON (a string, `{src, dst}`, or a list of them).
///
/// An invalid entry fails the whole call before any file is copied.
pub async fn copy_json(specs: &serde_json::Value, dest: impl AsRef<Path>) -> Result<()> {
    let specs = CopySpec::parse_json(specs)?;
    copy(specs, dest).await
}
