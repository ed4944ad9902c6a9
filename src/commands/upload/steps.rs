//! The individual steps of an upload run, in execution order

use anyhow::{Context, Result};

use super::display;
use super::UploadConfig;
use crate::config::Settings;
use crate::error::UploadError;
use crate::git::{GitRunner, Repository};
use crate::prompt::Prompter;
use crate::remote::{author_name, is_email, token_settings_url, RemoteTarget};
use crate::secret::Secret;

/// What the commit step ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Created,
    ExistingHistory,
}

/// Prompt for account, repository name and token, then ask for confirmation
pub fn gather_config<P: Prompter>(settings: &Settings, prompter: &mut P) -> Result<UploadConfig> {
    display::print_section("Repository configuration");

    let account = prompter.ask("Username or email: ")?;
    if account.is_empty() {
        return Err(UploadError::EmptyAccount.into());
    }

    println!("\nRecommended repository name: {}", settings.default_repo_name);
    let repo_name = prompter.ask("Repository name (Enter for recommended): ")?;
    let repo_name = if repo_name.is_empty() {
        settings.default_repo_name.clone()
    } else {
        repo_name
    };

    display::print_token_hint(&token_settings_url(&settings.host));
    let token = prompter.ask_secret("Access token (input hidden): ")?;
    if token.is_empty() {
        return Err(UploadError::EmptyToken.into());
    }

    display::print_config_summary(&account, &repo_name);
    if !prompter.confirm("\nConfirm these details?")? {
        return Err(UploadError::Cancelled.into());
    }

    tracing::info!(%account, %repo_name, "configuration confirmed");
    Ok(UploadConfig {
        account,
        repo_name,
        token,
    })
}

/// Create the repository unless one already exists
///
/// Returns `true` if a new repository was created.
pub fn init_repository<R: GitRunner>(settings: &Settings, repo: &Repository<R>) -> Result<bool> {
    display::print_step("Initializing git repository");

    if repo.is_initialized() {
        display::print_info("Repository already exists");
        return Ok(false);
    }

    repo.init(&settings.branch)
        .context("Failed to initialize repository")?;
    display::print_ok(&format!("Repository initialized on branch {}", settings.branch));
    Ok(true)
}

/// Stage everything. A failure here is reported and the run continues.
pub fn stage_files<R: GitRunner>(repo: &Repository<R>) -> bool {
    display::print_step("Staging files");

    match repo.add_all() {
        Ok(()) => {
            display::print_ok("Files staged");
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "staging failed");
            display::print_warn("Some files may not have been staged, continuing");
            false
        }
    }
}

/// Set the author identity and commit, accepting existing history instead
pub fn create_commit<R: GitRunner>(
    settings: &Settings,
    repo: &Repository<R>,
    config: &UploadConfig,
) -> Result<CommitOutcome> {
    display::print_step("Creating commit");

    repo.set_identity(&config.account, author_name(&config.account))
        .context("Failed to set author identity")?;

    if !repo.has_staged_changes()? {
        if repo.head_exists()? {
            display::print_info("Nothing new to commit, using existing history");
            return Ok(CommitOutcome::ExistingHistory);
        }
        return Err(UploadError::NothingToCommit.into());
    }

    match repo.commit(&settings.commit_message) {
        Ok(()) => {
            display::print_ok("Commit created");
            Ok(CommitOutcome::Created)
        }
        Err(e) => {
            if !repo.head_exists()? {
                return Err(e.context("Failed to create commit"));
            }
            tracing::warn!(error = %e, "commit failed, falling back to existing history");
            display::print_info("Commit skipped, using existing history");
            Ok(CommitOutcome::ExistingHistory)
        }
    }
}

/// Have the operator confirm the hosted repository exists
pub fn confirm_remote_exists<P: Prompter>(
    settings: &Settings,
    prompter: &mut P,
    config: &UploadConfig,
) -> Result<RemoteTarget> {
    display::print_step("Checking the hosted repository");

    let owner = if is_email(&config.account) {
        display::print_warn("An email address cannot be used in the repository URL");
        let owner = prompter.ask("  Hosting username: ")?;
        if owner.is_empty() {
            return Err(UploadError::EmptyOwner.into());
        }
        owner
    } else {
        config.account.clone()
    };

    let target = RemoteTarget::new(&settings.host, owner, &config.repo_name);
    display::print_remote_instructions(&target);

    if !prompter.confirm("\n  Has the repository been created?")? {
        return Err(UploadError::RemoteNotCreated.into());
    }

    Ok(target)
}

/// Point the remote at the token-bearing URL, adding the remote if needed
pub fn configure_remote<R: GitRunner>(
    settings: &Settings,
    repo: &Repository<R>,
    target: &RemoteTarget,
    token: &Secret,
) -> Result<()> {
    display::print_step("Configuring remote");

    let url = target.authenticated_url(token);
    let updated = repo
        .upsert_remote(&settings.remote, &url)
        .with_context(|| format!("Failed to configure remote '{}'", settings.remote))?;

    if updated {
        display::print_ok(&format!("Updated remote '{}'", settings.remote));
    } else {
        display::print_ok(&format!("Added remote '{}'", settings.remote));
    }
    Ok(())
}

/// Push the primary branch and record upstream tracking
pub fn push<R: GitRunner>(settings: &Settings, repo: &Repository<R>) -> Result<()> {
    display::print_step(&format!("Pushing {} to {}", settings.branch, settings.remote));
    display::print_info("This may take a few minutes...");

    match repo.push_upstream(&settings.remote, &settings.branch) {
        Ok(()) => {
            display::print_ok("Push succeeded");
            Ok(())
        }
        Err(e) => {
            display::print_push_failure_hints();
            Err(e.into())
        }
    }
}

/// Rewrite the remote URL without the token. Failure is reported, not fatal.
pub fn scrub_credentials<R: GitRunner>(
    settings: &Settings,
    repo: &Repository<R>,
    target: &RemoteTarget,
) -> bool {
    display::print_step("Removing credentials from remote URL");

    match repo.set_remote_url(&settings.remote, &target.clean_url()) {
        Ok(()) => {
            display::print_ok("Credentials removed");
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "credential scrub failed");
            display::print_warn("Could not remove the token from the remote URL; run `ghup scrub`");
            false
        }
    }
}
