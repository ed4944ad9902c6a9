//! Git process invocation
//!
//! Everything the upload run does to a repository goes through
//! [`GitRunner`], so the run sequence can be exercised against a scripted
//! runner in tests. [`GitCli`] is the real implementation.

pub mod repo;
#[cfg(test)]
pub(crate) mod testing;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::UploadError;
use crate::remote::redact_credentials;

pub use repo::Repository;

/// Captured result of one git invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Trimmed stdout on success, a redacted [`UploadError::Git`] otherwise
    pub fn into_result(self, args: &[&str]) -> Result<String, UploadError> {
        if self.success {
            Ok(self.stdout.trim().to_string())
        } else {
            Err(UploadError::Git {
                command: describe(args),
                stderr: redact_credentials(self.stderr.trim()),
            })
        }
    }
}

/// Runs git subcommands in a fixed working directory
pub trait GitRunner {
    /// Run with stdout and stderr captured
    fn output(&self, args: &[&str]) -> Result<GitOutput>;

    /// Run with stdout and stderr attached to the terminal, returning
    /// whether git exited successfully
    fn status(&self, args: &[&str]) -> Result<bool>;
}

/// Human-readable, credential-free rendering of a git command line
pub fn describe(args: &[&str]) -> String {
    redact_credentials(&format!("git {}", args.join(" ")))
}

/// [`GitRunner`] backed by the git executable
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    work_dir: PathBuf,
}

impl GitCli {
    pub fn new(program: impl Into<String>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            work_dir: work_dir.into(),
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .current_dir(&self.work_dir)
            // Never block on a credential helper asking for a password
            .env("GIT_TERMINAL_PROMPT", "0");
        command
    }
}

impl GitRunner for GitCli {
    fn output(&self, args: &[&str]) -> Result<GitOutput> {
        tracing::debug!(command = %describe(args), dir = %self.work_dir.display(), "running");

        let output = self
            .command(args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to execute {}", describe(args)))?;

        let result = GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.success {
            tracing::debug!(
                command = %describe(args),
                status = %output.status,
                stderr = %redact_credentials(result.stderr.trim()),
                "git exited with failure"
            );
        }

        Ok(result)
    }

    fn status(&self, args: &[&str]) -> Result<bool> {
        tracing::debug!(command = %describe(args), dir = %self.work_dir.display(), "running attached");

        let status = self
            .command(args)
            .stdin(Stdio::null())
            .status()
            .with_context(|| format!("Failed to execute {}", describe(args)))?;

        tracing::debug!(command = %describe(args), %status, "git finished");
        Ok(status.success())
    }
}

/// Check that the git program can be found and runs
///
/// Returns the version line git reports, e.g. `git version 2.43.0`.
pub fn check_git_available(program: &str) -> Result<String, UploadError> {
    let path = which::which(program).map_err(|e| UploadError::GitUnavailable {
        program: program.to_string(),
        reason: e.to_string(),
    })?;

    let output = Command::new(&path)
        .arg("--version")
        .stdin(Stdio::null())
        .output()
        .map_err(|e| UploadError::GitUnavailable {
            program: program.to_string(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(UploadError::GitUnavailable {
            program: program.to_string(),
            reason: format!("`{} --version` exited with {}", path.display(), output.status),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
