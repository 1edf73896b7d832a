//! Shell command and file helpers for build scripts
//!
//! A small set of async helpers meant to be called from build scripts and
//! file-processing pipelines: running shell commands, formatting command-line
//! arguments, cleaning and removing paths, copying files, and rewriting file
//! contents as they stream through a pipeline.
//!
//! # Example
//!
//! ```ignore
//! use build_utils::{Args, ExecOptions, FormatOptions, args, clean, copy, exec, rm};
//!
//! let opts = ExecOptions::from_env();
//! rm("dist").await?;
//! copy(["LICENSE", "README.md"], "dist").await?;
//! clean("build", "*.o", Some(2), &opts).await?;
//!
//! let flags = Args::new().set("--release", true).set("-j", 4);
//! exec(&format!("cargo build {}", args(&flags, &FormatOptions::default())), &opts).await?;
//! ```
//!
//! # Dry Run
//!
//! Set `BUILD_UTILS_DRY_RUN=1` and build options with [`ExecOptions::from_env`]
//! to print commands instead of running them.

pub mod error;
pub mod helpers;
pub mod output;

pub use error::{Error, Result};
pub use helpers::*;
