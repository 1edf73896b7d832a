//! Helper error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running build helpers.
#[derive(Error, Debug)]
pub enum Error {
    #[error("command failed: {cmd} (exit code: {code:?})\nstderr: {stderr}")]
    CommandFailed {
        cmd: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("command failed to start: {cmd}: {source}")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{op} failed for {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("copy failed: {} -> {}: {source}", src.display(), dst.display())]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid copy source at index {index}: expected a path or {{src, dst}}, got {found}")]
    InvalidCopySpec { index: usize, found: String },

    #[error("unsupported value for argument '{name}': {found}")]
    UnsupportedArg { name: String, found: String },

    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("cannot encode content as {encoding}: {reason}")]
    Encoding {
        encoding: &'static str,
        reason: String,
    },

    #[error("rewrite failed for {}: {source}", path.display())]
    Rewrite {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl Error {
    /// The captured standard-error text of a failed command, if any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Error::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
