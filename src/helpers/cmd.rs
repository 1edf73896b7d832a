//! Shell command execution
//!
//! Provides a builder for running shell commands through `sh -c` with
//! captured output, consistent error handling and dry-run support.

use crate::error::{Error, Result};
use crate::output;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Environment variable that turns on dry-run mode in [`ExecOptions::from_env`].
pub const DRY_RUN_ENV: &str = "BUILD_UTILS_DRY_RUN";

/// Options for [`exec`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExecOptions {
    /// Log the command instead of running it.
    pub dry_run: bool,
}

impl ExecOptions {
    /// Options with dry-run enabled.
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    /// Read options from the environment (`BUILD_UTILS_DRY_RUN`).
    pub fn from_env() -> Self {
        Self {
            dry_run: parse_flag(std::env::var(DRY_RUN_ENV).ok().as_deref()),
        }
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "" | "0" | "false" | "no" | "off" => false,
        other => {
            output::warning(&format!("ignoring {}={}", DRY_RUN_ENV, other));
            false
        }
    }
}

/// Builder for shell command execution.
///
/// # Example
/// ```ignore
/// let stdout = ShellCmd::new("git rev-parse HEAD")
///     .dir("/tmp/build")
///     .env("GIT_DIR", ".git")
///     .output()
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct ShellCmd {
    cmd: String,
    cwd: Option<PathBuf>,
    env: HashMap<String, String>,
    dry_run: bool,
}

impl ShellCmd {
    /// Create a new shell command.
    pub fn new(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            cwd: None,
            env: HashMap::new(),
            dry_run: false,
        }
    }

    /// Set the working directory for the command.
    pub fn dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set an environment variable for the command.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set multiple environment variables at once.
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in vars {
            self.env.insert(k.into(), v.into());
        }
        self
    }

    /// Only log the command when it would run.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", &self.cmd])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        for (k, v) in &self.env {
            cmd.env(k, v);
        }

        cmd
    }

    /// Run the command and capture stdout.
    ///
    /// In dry-run mode the command is only logged and an empty string is
    /// returned. A non-zero exit fails with the captured stderr.
    pub async fn output(&self) -> Result<String> {
        let out = self.output_all().await?;
        if !out.success {
            return Err(Error::CommandFailed {
                cmd: self.cmd.clone(),
                code: out.exit_code,
                stderr: out.stderr,
            });
        }

        Ok(out.stdout)
    }

    /// Run the command and capture both stdout and stderr.
    ///
    /// Only fails when the process cannot be started. In dry-run mode the
    /// command is only logged and an empty successful output is returned.
    pub async fn output_all(&self) -> Result<CmdOutput> {
        if self.dry_run {
            output::dry_run(&self.cmd);
            return Ok(CmdOutput {
                stdout: String::new(),
                stderr: String::new(),
                exit_code: Some(0),
                success: true,
            });
        }

        let output = self
            .build_command()
            .output()
            .await
            .map_err(|source| Error::Spawn {
                cmd: self.cmd.clone(),
                source,
            })?;

        Ok(CmdOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
            success: output.status.success(),
        })
    }

    fn truncated_cmd(&self) -> String {
        if self.cmd.chars().count() > 60 {
            let head: String = self.cmd.chars().take(57).collect();
            format!("{}...", head)
        } else {
            self.cmd.clone()
        }
    }

    /// Get the full command string.
    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    /// Get the truncated command string for display.
    pub fn display_cmd(&self) -> String {
        self.truncated_cmd()
    }
}

/// Output from a command execution.
#[derive(Debug, Clone)]
pub struct CmdOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub success: bool,
}

/// Run a shell command and return its stdout.
///
/// # Example
/// ```ignore
/// let rev = exec("git rev-parse HEAD", &ExecOptions::default()).await?;
/// exec("rm -rf /", &ExecOptions::dry_run()).await?; // only prints
/// ```
pub async fn exec(cmd: &str, opts: &ExecOptions) -> Result<String> {
    ShellCmd::new(cmd).dry_run(opts.dry_run).output().await
}
