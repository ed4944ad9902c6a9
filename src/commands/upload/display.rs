//! Console output for the upload run

use colored::Colorize;
use std::path::Path;

use crate::config::Settings;
use crate::remote::RemoteTarget;
use crate::secret::MASK;

const WIDTH: usize = 60;

/// Print the banner shown before anything else
pub fn print_banner() {
    println!();
    println!("{}", format!("╭{}╮", "─".repeat(WIDTH - 2)).cyan());
    println!(
        "{}",
        format!("│{:^width$}│", "ghup - upload a project to git hosting", width = WIDTH - 2)
            .cyan()
            .bold()
    );
    println!("{}", format!("╰{}╯", "─".repeat(WIDTH - 2)).cyan());
}

/// Print a section title with an underline
pub fn print_section(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(WIDTH).dimmed());
}

/// Print a step heading
pub fn print_step(title: &str) {
    println!("\n{} {}", "▶".cyan().bold(), title.bold());
}

pub fn print_ok(message: &str) {
    println!("  {} {}", "✓".green().bold(), message);
}

pub fn print_info(message: &str) {
    println!("  {} {}", "─".dimmed(), message);
}

pub fn print_warn(message: &str) {
    println!("  {} {}", "⚠".yellow().bold(), message);
}

/// Show what was gathered, with the token masked
pub fn print_config_summary(account: &str, repo_name: &str) {
    println!();
    println!("{}", "─".repeat(WIDTH).dimmed());
    println!("Please confirm:");
    println!("  Account:    {}", account.cyan());
    println!("  Repository: {}", repo_name.cyan());
    println!("  Token:      {} {}", MASK, "(hidden)".dimmed());
    println!("{}", "─".repeat(WIDTH).dimmed());
}

pub fn print_token_hint(token_url: &str) {
    println!();
    println!(
        "{} Enter a personal access token, not your password",
        "⚠".yellow().bold()
    );
    println!("  Create one at: {}", token_url.underline());
    println!("  Required scope: {}", "repo".bold());
}

/// Where the remote repository is expected and how to create it
pub fn print_remote_instructions(target: &RemoteTarget) {
    println!();
    println!("  Make sure this repository exists:");
    println!("    {}", target.web_url().underline());
    println!();
    println!("  If it does not, create it at {}", target.new_repository_url().underline());
    println!("    - Repository name: {}", target.repo.bold());
    println!("    - Do not initialize it with a README");
}

/// Probable causes of a failed push. Which one applies is not checked.
pub fn print_push_failure_hints() {
    println!();
    println!("  {} Push failed. Possible causes:", "✗".red().bold());
    println!("    1. The token lacks permission to push");
    println!("    2. The repository does not exist");
    println!("    3. A network problem");
}

/// Final summary with the follow-up commands for later updates
pub fn print_success(settings: &Settings, target: &RemoteTarget) {
    println!();
    println!("{}", "═".repeat(WIDTH).dimmed());
    println!("{} Upload complete", "✓".green().bold());
    println!();
    println!("  Repository: {}", target.web_url().underline());
    println!();
    println!("  To publish later changes:");
    for command in follow_up_commands(&settings.root) {
        println!("    {}", command.dimmed());
    }
    println!("{}", "═".repeat(WIDTH).dimmed());
    println!();
}

/// Commands an operator runs to push further changes
pub fn follow_up_commands(root: &Path) -> Vec<String> {
    let root = root.to_string_lossy();
    vec![
        format!("cd {}", shell_escape::escape(root)),
        "git add .".to_string(),
        "git commit -m \"<your message>\"".to_string(),
        "git push".to_string(),
    ]
}
