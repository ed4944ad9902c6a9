//! Ctrl-C handling
//!
//! Blocking reads on stdin are not woken by SIGINT, so the handler ends the
//! process itself with the failure status after restoring the terminal.

use anyhow::{Context, Result};
use colored::Colorize;

/// Exit status for every abort, including operator interruption
pub const FAILURE_EXIT_CODE: i32 = 1;

pub fn install() -> Result<()> {
    ctrlc::set_handler(|| {
        let _ = crossterm::terminal::disable_raw_mode();
        eprintln!("\n\n{} Operation cancelled", "✗".red().bold());
        std::process::exit(FAILURE_EXIT_CODE);
    })
    .context("Failed to install Ctrl-C handler")
}
