//! Colored console output for build helpers
//!
//! Uses owo-colors for terminal colors. Helpers report what they did on
//! stdout; warnings go to stderr.

use owo_colors::OwoColorize;

/// Print a command that would have run.
/// Example: "[DRYRUN] make -j4"
pub fn dry_run(cmd: &str) {
    println!("{} {}", "[DRYRUN]".yellow().bold(), cmd);
}

/// Print a detail line (dimmed, indented)
/// Example: "     cp src/a.txt -> dist/a.txt"
pub fn detail(message: &str) {
    println!("     {}", message.dimmed());
}

/// Print a warning message (yellow)
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}
