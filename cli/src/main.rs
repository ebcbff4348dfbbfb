//! # vcprompt Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the vcprompt CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Resolving the prompt configuration from arguments and environment
//! - Printing the rendered prompt for the repository enclosing `--path`
//!
//! ## Architecture
//!
//! - `core`: configuration, errors, template interpolation, status normalization
//! - `common`: filesystem and subprocess helpers
//! - `vcs`: one probe per supported VCS, the probe registry and the locator
//!
//! The prompt goes to stdout without a trailing newline. Logs go to stderr.
//! Being outside any repository is not an error: the output is simply empty
//! and the exit status is 0.
//!
//! ## Examples
//!
//! ```bash
//! # Default format "%s:%b", e.g. "git:main"
//! vcprompt
//!
//! # Custom format for another directory
//! vcprompt -p ~/src/project -f '[%b@%h %i]'
//!
//! # In a shell prompt
//! PS1='\w $(vcprompt -f "(%b)") \$ '
//! ```
//!
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod common; // Shared utilities (fs, process)
mod core; // Core infrastructure (config, errors, format, status)
mod vcs; // Per-VCS probes and the repository locator

use crate::common::process::SystemRunner;
use crate::core::config::PromptConfig;

/// Defines the command-line arguments using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "vcprompt",
    about = "Print version control information for use in a shell prompt",
    long_about = "Finds the repository enclosing PATH (Bazaar, CVS, Darcs, Fossil, Git,\n\
                  Mercurial or Subversion) and prints FORMAT with these substitutions:\n\
                  \n  %s  VCS name\n  %b  branch\n  %h  short hash\n  %r  revision\n  %i  working tree status\n\
                  \nFields that cannot be determined print as $VCPROMPT_UNKNOWN (default \"(unknown)\").",
    version
)]
struct Cli {
    /// Format string (same as --format).
    #[arg(value_name = "FORMAT")]
    format_arg: Option<String>,

    /// The format string to use. Defaults to $VCPROMPT_FORMAT or "%s:%b".
    #[arg(short, long)]
    format: Option<String>,

    /// The path to run vcprompt on.
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Show each status code at most once.
    #[arg(short, long)]
    unique_status: bool,

    /// Increase log verbosity on stderr (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let config = PromptConfig::resolve(cli.format.or(cli.format_arg), cli.unique_status, |key| {
        std::env::var(key).ok()
    });
    let prompt = vcs::locator::locate(&cli.path, &config, &SystemRunner);

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(prompt.as_bytes()).and_then(|_| stdout.flush()) {
        // A closed pipe must not turn into a visible error in the shell prompt.
        tracing::warn!("Failed to write prompt: {}", e);
    }

    Ok(())
}
