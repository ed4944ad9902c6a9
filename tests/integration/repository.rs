//! Upload steps against real repositories in temp directories

use std::io::Cursor;

use ghup::commands::scrub::{scrub, ScrubOutcome};
use ghup::commands::upload;
use ghup::config::Settings;
use ghup::error::UploadError;
use ghup::git::{GitCli, Repository};
use ghup::prompt::LinePrompter;
use ghup::remote::RemoteTarget;
use ghup::secret::Secret;
use serial_test::serial;
use tempfile::TempDir;

use crate::common::{create_project, git, isolate_git_config, TOKEN};

fn setup() -> (TempDir, TempDir) {
    let home = TempDir::new().expect("Failed to create home dir");
    isolate_git_config(home.path());

    let project = TempDir::new().expect("Failed to create project dir");
    create_project(project.path());
    (home, project)
}

fn repository(root: &std::path::Path) -> Repository<GitCli> {
    Repository::new(GitCli::new("git", root), root)
}

/// Answers that get a run as far as the remote confirmation, then decline it
fn declining_answers() -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
    let input = format!("alice@example.com\ndemo\n{TOKEN}\ny\nalice\nn\n");
    LinePrompter::new(Cursor::new(input.into_bytes()), Vec::new())
}

#[test]
#[serial]
fn test_run_commits_then_stops_at_remote_confirmation() {
    let (_home, project) = setup();
    let root = project.path();
    let settings = Settings::defaults(root.to_path_buf());
    let repo = repository(root);

    let err = upload::run(&settings, &repo, &mut declining_answers()).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<UploadError>(),
        Some(UploadError::RemoteNotCreated)
    ));
    assert!(root.join(".git").is_dir());
    assert_eq!(git(root, &["rev-list", "--count", "HEAD"]), "1");
    assert_eq!(git(root, &["symbolic-ref", "--short", "HEAD"]), "main");
    assert_eq!(git(root, &["config", "user.email"]), "alice@example.com");
    assert_eq!(git(root, &["config", "user.name"]), "alice");
    assert_eq!(git(root, &["remote"]), "");
}

#[test]
#[serial]
fn test_second_run_is_idempotent() {
    let (_home, project) = setup();
    let root = project.path();
    let settings = Settings::defaults(root.to_path_buf());

    let first = upload::run(&settings, &repository(root), &mut declining_answers()).unwrap_err();
    let second = upload::run(&settings, &repository(root), &mut declining_answers()).unwrap_err();

    for err in [first, second] {
        assert!(matches!(
            err.downcast_ref::<UploadError>(),
            Some(UploadError::RemoteNotCreated)
        ));
    }
    // No second commit, no nested repository metadata
    assert_eq!(git(root, &["rev-list", "--count", "HEAD"]), "1");
    assert!(!root.join(".git").join(".git").exists());
}

#[test]
#[serial]
fn test_new_files_are_committed_on_rerun() {
    let (_home, project) = setup();
    let root = project.path();
    let settings = Settings::defaults(root.to_path_buf());

    upload::run(&settings, &repository(root), &mut declining_answers()).unwrap_err();
    std::fs::write(root.join("CHANGELOG.md"), "- first\n").unwrap();
    upload::run(&settings, &repository(root), &mut declining_answers()).unwrap_err();

    assert_eq!(git(root, &["rev-list", "--count", "HEAD"]), "2");
}

#[test]
#[serial]
fn test_existing_repository_is_detected() {
    let (_home, project) = setup();
    let root = project.path();
    git(root, &["init"]);
    let repo = repository(root);

    assert!(repo.is_initialized());
    assert!(!repo.head_exists().unwrap());
}

#[test]
#[serial]
fn test_remote_upsert_then_scrub_leaves_no_token() {
    let (_home, project) = setup();
    let root = project.path();
    let repo = repository(root);
    repo.init("main").unwrap();

    let target = RemoteTarget::new("github.com", "alice", "demo");
    let updated = repo
        .upsert_remote("origin", &target.authenticated_url(&Secret::new(TOKEN)))
        .unwrap();
    assert!(!updated);
    assert!(git(root, &["remote", "get-url", "origin"]).contains(TOKEN));

    // A second upsert overwrites rather than failing on the existing remote
    assert!(repo
        .upsert_remote("origin", &target.authenticated_url(&Secret::new(TOKEN)))
        .unwrap());

    let outcome = scrub(&repo, "origin").unwrap();

    assert_eq!(outcome, ScrubOutcome::Scrubbed(target.clean_url()));
    let url = git(root, &["remote", "get-url", "origin"]);
    assert!(!url.contains(TOKEN));
    assert_eq!(url, "https://github.com/alice/demo.git");

    let config = std::fs::read_to_string(root.join(".git").join("config")).unwrap();
    assert!(!config.contains(TOKEN));
}

#[test]
#[serial]
fn test_push_to_unreachable_remote_fails_and_keeps_history() {
    let (_home, project) = setup();
    let root = project.path();
    let repo = repository(root);
    repo.init("main").unwrap();
    repo.add_all().unwrap();
    repo.set_identity("alice@example.com", "alice").unwrap();
    repo.commit("Initial commit").unwrap();

    let missing = project.path().join("no-such-remote.git");
    repo.add_remote("origin", missing.to_str().unwrap()).unwrap();

    let err = repo.push_upstream("origin", "main").unwrap_err();

    assert!(matches!(err, UploadError::PushFailed { .. }));
    assert!(repo.head_exists().unwrap());
}
