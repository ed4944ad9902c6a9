//! Scrub command: remove an embedded token from a remote URL
//! Usage: ghup scrub [--path DIR] [--remote NAME]
//!
//! Covers the case where an upload configured the token-bearing URL but the
//! push failed, so the run never reached its own scrub step.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::Settings;
use crate::error::UploadError;
use crate::git::{check_git_available, GitCli, GitRunner, Repository};
use crate::remote::strip_credentials;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrubOutcome {
    /// The URL carried a credential and was rewritten to this URL
    Scrubbed(String),
    /// The URL carried no credential
    AlreadyClean(String),
}

pub fn execute(settings: &Settings) -> Result<()> {
    check_git_available(&settings.git)?;
    let repo = Repository::new(GitCli::new(&settings.git, &settings.root), &settings.root);

    match scrub(&repo, &settings.remote)? {
        ScrubOutcome::Scrubbed(url) => {
            println!(
                "{} Removed credentials from remote '{}': {}",
                "✓".green().bold(),
                settings.remote,
                url.dimmed()
            );
        }
        ScrubOutcome::AlreadyClean(url) => {
            println!(
                "{} Remote '{}' has no embedded credentials: {}",
                "✓".green().bold(),
                settings.remote,
                url.dimmed()
            );
        }
    }

    Ok(())
}

/// Rewrite `remote`'s URL without userinfo, if it has any
pub fn scrub<R: GitRunner>(repo: &Repository<R>, remote: &str) -> Result<ScrubOutcome> {
    let url = repo
        .remote_url(remote)?
        .ok_or_else(|| UploadError::NoRemote(remote.to_string()))?;

    match strip_credentials(&url) {
        Some(clean) => {
            repo.set_remote_url(remote, &clean)
                .with_context(|| format!("Failed to rewrite URL of remote '{remote}'"))?;
            tracing::info!(%remote, "credentials scrubbed");
            Ok(ScrubOutcome::Scrubbed(clean))
        }
        None => Ok(ScrubOutcome::AlreadyClean(url)),
    }
}
