//! The repository operations an upload run needs
//!
//! Thin, named wrappers over [`GitRunner`] calls. Routine conditions
//! ("is there a commit yet?", "is the remote configured?") are answered by
//! explicit queries rather than by interpreting a failed mutation.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{GitOutput, GitRunner};
use crate::error::UploadError;

pub struct Repository<R: GitRunner> {
    runner: R,
    root: PathBuf,
}

impl<R: GitRunner> Repository<R> {
    pub fn new(runner: R, root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn run(&self, args: &[&str]) -> Result<GitOutput> {
        self.runner.output(args)
    }

    fn run_checked(&self, args: &[&str]) -> Result<String> {
        Ok(self.run(args)?.into_result(args)?)
    }

    /// Whether the project root already holds a repository
    pub fn is_initialized(&self) -> bool {
        self.root.join(".git").exists()
    }

    /// `git init`, then point the unborn HEAD at `branch`
    pub fn init(&self, branch: &str) -> Result<()> {
        self.run_checked(&["init"])?;
        let head_ref = format!("refs/heads/{branch}");
        self.run_checked(&["symbolic-ref", "HEAD", &head_ref])?;
        Ok(())
    }

    /// Stage every file under the root
    pub fn add_all(&self) -> Result<()> {
        self.run_checked(&["add", "."])?;
        Ok(())
    }

    /// Set the repository-local author identity
    pub fn set_identity(&self, email: &str, name: &str) -> Result<()> {
        self.run_checked(&["config", "user.email", email])?;
        self.run_checked(&["config", "user.name", name])?;
        Ok(())
    }

    /// Whether the index differs from HEAD (or holds anything, before the first commit)
    pub fn has_staged_changes(&self) -> Result<bool> {
        let staged = self.run_checked(&["diff", "--cached", "--name-only"])?;
        Ok(!staged.is_empty())
    }

    /// Whether HEAD resolves to a commit
    pub fn head_exists(&self) -> Result<bool> {
        Ok(self.run(&["rev-parse", "--verify", "--quiet", "HEAD"])?.success)
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.run_checked(&["commit", "-m", message])?;
        Ok(())
    }

    /// URL of a remote, or `None` if no such remote is configured
    pub fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        let output = self.run(&["remote", "get-url", remote])?;
        if output.success {
            Ok(Some(output.stdout.trim().to_string()))
        } else {
            Ok(None)
        }
    }

    pub fn add_remote(&self, remote: &str, url: &str) -> Result<()> {
        self.run_checked(&["remote", "add", remote, url])?;
        Ok(())
    }

    pub fn set_remote_url(&self, remote: &str, url: &str) -> Result<()> {
        self.run_checked(&["remote", "set-url", remote, url])?;
        Ok(())
    }

    /// Add the remote, or overwrite its URL if it already exists
    ///
    /// Returns `true` when an existing remote was updated.
    pub fn upsert_remote(&self, remote: &str, url: &str) -> Result<bool> {
        if self.remote_url(remote)?.is_some() {
            self.set_remote_url(remote, url)?;
            Ok(true)
        } else {
            self.add_remote(remote, url)?;
            Ok(false)
        }
    }

    /// `git push -u <remote> <branch>` with progress shown on the terminal
    pub fn push_upstream(&self, remote: &str, branch: &str) -> Result<(), UploadError> {
        let args = ["push", "-u", remote, branch];
        match self.runner.status(&args) {
            Ok(true) => Ok(()),
            Ok(false) => Err(UploadError::PushFailed {
                remote: remote.to_string(),
            }),
            Err(e) => {
                tracing::warn!(error = %e, "push could not be started");
                Err(UploadError::PushFailed {
                    remote: remote.to_string(),
                })
            }
        }
    }
}
