//! Build helper functions
//!
//! The public API used by build scripts.
//!
//! ## Categories
//!
//! - **cmd**: exec, ShellCmd
//! - **args**: args, Args
//! - **fs**: clean, rm, copy, copy_json
//! - **transform**: modify, FileItem

// Internal utility modules (used by other helpers)
pub(crate) mod internal;

pub mod args;
pub mod cmd;
pub mod fs;
pub mod transform;

pub use args::{ArgValue, Args, FormatOptions, args};
pub use cmd::{CmdOutput, ExecOptions, ShellCmd, exec};
pub use fs::{CopySpec, DEFAULT_CLEAN_DEPTH, clean, clean_command, copy, copy_json, rm};
pub use transform::{Encoding, FileItem, Modify, Rewritten, modify};
