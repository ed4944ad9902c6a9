use anyhow::Result;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use std::backtrace::BacktraceStatus;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use ghup::commands::{completions, scrub, upload};
use ghup::config::{Overrides, Settings};
use ghup::error::UploadError;
use ghup::interrupt::{self, FAILURE_EXIT_CODE};
use ghup::remote::redact_credentials;

/// Environment variable holding a tracing filter, e.g. `GHUP_LOG=debug`
const LOG_ENV_VAR: &str = "GHUP_LOG";

#[derive(Parser)]
#[command(name = "ghup")]
#[command(about = "Commit a project tree and push it to a hosted git repository", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    upload: UploadArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize, commit and push the project (default)
    Upload(UploadArgs),

    /// Remove an embedded token from a remote URL
    Scrub {
        /// Project directory (default: current directory)
        #[arg(short, long, value_name = "DIR")]
        path: Option<PathBuf>,

        /// Remote name
        #[arg(short, long)]
        remote: Option<String>,
    },

    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Args)]
struct UploadArgs {
    /// Project directory (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    path: Option<PathBuf>,

    /// Hosting service host name (default: github.com)
    #[arg(long)]
    host: Option<String>,

    /// Primary branch (default: main)
    #[arg(short, long)]
    branch: Option<String>,

    /// Remote name (default: origin)
    #[arg(short, long)]
    remote: Option<String>,

    /// Commit message for the initial commit
    #[arg(short, long)]
    message: Option<String>,

    /// Repository name offered when the prompt is left blank
    #[arg(long, value_name = "NAME")]
    default_repo: Option<String>,
}

impl From<UploadArgs> for Overrides {
    fn from(args: UploadArgs) -> Self {
        Overrides {
            root: args.path,
            host: args.host,
            branch: args.branch,
            remote: args.remote,
            commit_message: args.message,
            default_repo_name: args.default_repo,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_tracing(cli.verbose);

    if let Err(e) = interrupt::install() {
        tracing::warn!(error = %e, "Ctrl-C will not be handled");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(FAILURE_EXIT_CODE as u8)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None => upload::execute(&Settings::resolve(&cli.upload.into())?),
        Some(Commands::Upload(args)) => upload::execute(&Settings::resolve(&args.into())?),
        Some(Commands::Scrub { path, remote }) => {
            let overrides = Overrides {
                root: path,
                remote,
                ..Default::default()
            };
            scrub::execute(&Settings::resolve(&overrides)?)
        }
        Some(Commands::Completions { shell }) => {
            completions::execute(&mut Cli::command(), shell);
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,ghup={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Print an error for the operator. Every line is credential-redacted.
fn report(err: &anyhow::Error) {
    if let Some(upload_err) = err.downcast_ref::<UploadError>() {
        if upload_err.is_operator_abort() {
            eprintln!("\n{} {}", "✗".red().bold(), upload_err);
            return;
        }
    }

    eprintln!(
        "\n{} {}",
        "✗ Error:".red().bold(),
        redact_credentials(&err.to_string())
    );
    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", "caused by:".dimmed(), redact_credentials(&cause.to_string()));
    }

    let backtrace = err.backtrace();
    if backtrace.status() == BacktraceStatus::Captured {
        eprintln!("\n{}", redact_credentials(&backtrace.to_string()));
    }
}
