//! Upload command: commit the project tree and push it to the hosting service
//!
//! Usage: ghup [upload] [--path DIR] [--host HOST] [--branch NAME] ...
//!
//! The run is strictly sequential:
//! 1. check git is available
//! 2. gather account, repository name and token
//! 3. initialize the repository (no-op if it exists)
//! 4. stage files
//! 5. commit, or accept existing history
//! 6. have the operator confirm the hosted repository exists
//! 7. point the remote at a token-bearing URL
//! 8. push with upstream tracking
//! 9. rewrite the remote URL without the token
//! 10. print a summary

mod display;
mod steps;

use anyhow::Result;

use crate::config::Settings;
use crate::git::{check_git_available, GitCli, GitRunner, Repository};
use crate::prompt::{Prompter, TerminalPrompter};
use crate::secret::Secret;

pub use steps::CommitOutcome;

/// Values gathered from the operator for one run
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub account: String,
    pub repo_name: String,
    pub token: Secret,
}

/// Execute the upload command against the real terminal and git
pub fn execute(settings: &Settings) -> Result<()> {
    display::print_banner();

    let version = check_git_available(&settings.git)?;
    display::print_ok(&format!("Found {version}"));

    let repo = Repository::new(GitCli::new(&settings.git, &settings.root), &settings.root);
    let mut prompter = TerminalPrompter::new();

    run(settings, &repo, &mut prompter)
}

/// Steps 2-10 of the run, with git and the operator supplied by the caller
pub fn run<R: GitRunner, P: Prompter>(
    settings: &Settings,
    repo: &Repository<R>,
    prompter: &mut P,
) -> Result<()> {
    let config = steps::gather_config(settings, prompter)?;

    steps::init_repository(settings, repo)?;
    steps::stage_files(repo);
    steps::create_commit(settings, repo, &config)?;

    let target = steps::confirm_remote_exists(settings, prompter, &config)?;
    steps::configure_remote(settings, repo, &target, &config.token)?;
    steps::push(settings, repo)?;
    steps::scrub_credentials(settings, repo, &target);

    display::print_success(settings, &target);
    Ok(())
}
