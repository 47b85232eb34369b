//! git-dc - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use devolv_commit::generate_commit_message;
use devolv_commit::git::{
    collect_staged_diff, commit_index, open_repository, short_commit_id,
};
use devolv_commit::hook::install_hook;

/// Generate commit messages from staged changes.
#[derive(Parser, Debug)]
#[command(name = "git-dc")]
#[command(about = "Generate commit messages from staged changes")]
#[command(version)]
struct Cli {
    /// Path inside the repository (parent directories are searched)
    #[arg(short = 'C', long = "repo", global = true, default_value = ".")]
    repo: PathBuf,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a message from staged changes and commit with it
    Commit {
        /// Only print the generated message (used by the git hook)
        #[arg(long = "print")]
        print_only: bool,
    },

    /// Install a prepare-commit-msg hook that fills in the message
    InstallHook {
        /// Replace an existing hook that was not installed by git-dc
        #[arg(long)]
        force: bool,
    },
}

/// Settings for one commit run, derived from CLI flags.
struct RunConfig {
    repo_path: PathBuf,
    print_only: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.unwrap_or(Command::Commit { print_only: false }) {
        Command::Commit { print_only } => run_commit(&RunConfig {
            repo_path: cli.repo,
            print_only,
        }),
        Command::InstallHook { force } => {
            let repo = open_repository(&cli.repo)
                .context("Not a git repository. Run git-dc from within a git repository.")?;
            let path = install_hook(&repo, force).context("Failed to install hook")?;
            println!("✓ Installed prepare-commit-msg hook at {}", path.display());
            Ok(())
        }
    }
}

/// Log to stderr so hook output on stdout stays clean. `RUST_LOG` wins over
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn run_commit(config: &RunConfig) -> Result<()> {
    let repo = match open_repository(&config.repo_path) {
        Ok(repo) => repo,
        Err(e) if config.print_only => {
            warn!("{e}");
            return Ok(());
        }
        Err(e) => {
            return Err(e)
                .context("Not a git repository. Run git-dc from within a git repository.");
        }
    };

    // A failed diff read means there is nothing to report, not a fatal error.
    let message = match collect_staged_diff(&repo) {
        Ok(diff) => generate_commit_message(&diff),
        Err(e) => {
            warn!("Could not read staged changes: {e}");
            None
        }
    };

    let Some(message) = message else {
        if !config.print_only {
            println!("No staged changes.");
        }
        return Ok(());
    };

    if config.print_only {
        println!("{message}");
        return Ok(());
    }

    let oid = commit_index(&repo, &message).context("Failed to commit staged changes")?;
    let short_id = short_commit_id(&repo, oid)?;
    let subject = message.lines().next().unwrap_or_default();
    println!("[{short_id}] {subject}");

    Ok(())
}
