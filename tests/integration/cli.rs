//! End-to-end tests of the ghup binary

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

use crate::common::{create_project, TOKEN};

/// Run ghup with `args`, feeding `stdin`, isolated from the user's config
fn run_ghup(home: &Path, args: &[&str], stdin: &str, git: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ghup"));
    command
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("GIT_CONFIG_GLOBAL", home.join("gitconfig"))
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("NO_COLOR", "1")
        .env_remove("GHUP_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    match git {
        Some(git) => command.env("GHUP_GIT", git),
        None => command.env_remove("GHUP_GIT"),
    };

    let mut child = command.spawn().expect("Failed to spawn ghup");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for ghup")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_missing_git_exits_before_prompting() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let path = project.path().to_str().unwrap();

    let output = run_ghup(
        home.path(),
        &["--path", path],
        "alice\n",
        Some("/nonexistent/bin/git"),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("Username or email"));
    assert!(stderr(&output).contains("git is not available"));
    assert!(!project.path().join(".git").exists());
}

#[test]
fn test_empty_account_exits_without_touching_project() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    create_project(project.path());
    let path = project.path().to_str().unwrap();

    let output = run_ghup(home.path(), &["--path", path], "\n", None);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Username or email"));
    assert!(stderr(&output).contains("account identifier must not be empty"));
    assert!(!project.path().join(".git").exists());
}

#[test]
fn test_declined_details_exit_with_failure() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    create_project(project.path());
    let path = project.path().to_str().unwrap();

    let output = run_ghup(
        home.path(),
        &["upload", "--path", path],
        &format!("alice\n\n{TOKEN}\nn\n"),
        None,
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("configuration cancelled"));
    assert!(!stdout(&output).contains(TOKEN));
    assert!(!project.path().join(".git").exists());
}

#[test]
fn test_declined_remote_confirmation_configures_no_remote() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    create_project(project.path());
    let path = project.path().to_str().unwrap();

    let output = run_ghup(
        home.path(),
        &["--path", path],
        &format!("alice\n\n{TOKEN}\ny\nn\n"),
        None,
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("create the remote repository first"));
    assert!(stdout(&output).contains("https://github.com/alice/distributed-softbus"));

    let config = std::fs::read_to_string(project.path().join(".git").join("config")).unwrap();
    assert!(!config.contains("[remote"));
    assert!(!config.contains(TOKEN));
}

#[test]
fn test_scrub_command_removes_token() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let root = project.path();
    let token_url = format!("https://{TOKEN}@github.com/alice/demo.git");

    for args in [vec!["init"], vec!["remote", "add", "origin", token_url.as_str()]] {
        let status = Command::new("git")
            .args(&args)
            .current_dir(root)
            .env("GIT_CONFIG_GLOBAL", home.path().join("gitconfig"))
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .output()
            .unwrap()
            .status;
        assert!(status.success());
    }

    let output = run_ghup(home.path(), &["scrub", "--path", root.to_str().unwrap()], "", None);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!stdout(&output).contains(TOKEN));
    let config = std::fs::read_to_string(root.join(".git").join("config")).unwrap();
    assert!(!config.contains(TOKEN));
    assert!(config.contains("https://github.com/alice/demo.git"));
}

#[test]
fn test_scrub_without_remote_fails() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let status = Command::new("git")
        .arg("init")
        .current_dir(project.path())
        .output()
        .unwrap()
        .status;
    assert!(status.success());

    let output = run_ghup(
        home.path(),
        &["scrub", "--path", project.path().to_str().unwrap()],
        "",
        None,
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no remote named 'origin'"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();

    let output = run_ghup(home.path(), &["completions", "bash"], "", None);

    assert!(output.status.success());
    assert!(stdout(&output).contains("ghup"));
}
