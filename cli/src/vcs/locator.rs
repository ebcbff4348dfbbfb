//! # vcprompt Repository Locator
//!
//! File: cli/src/vcs/locator.rs
//!
//! ## Overview
//!
//! Walks from the starting path up to the filesystem root. At every level each
//! registered probe is asked, in registry order, whether the directory is one
//! of its repositories; the first match is rendered and returned. Reaching
//! the root without a match yields an empty string, which is the normal
//! answer outside a repository rather than an error.
//!
//! ## Examples
//!
//! ```rust
//! let cfg = PromptConfig::with_format("%s:%b");
//! let prompt = locator::locate(Path::new("."), &cfg, &SystemRunner);
//! // "git:main" inside a git work tree on `main`, "" elsewhere
//! ```
//!
use super::{registry, Probe, ProbeContext, ProbeOutcome};
use crate::common::process::CommandRunner;
use crate::core::config::PromptConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Renders the prompt for the repository enclosing `start` using the
/// built-in probe registry.
pub fn locate(start: &Path, config: &PromptConfig, runner: &dyn CommandRunner) -> String {
    let ctx = ProbeContext { config, runner };
    locate_with(start, registry(), &ctx)
}

/// Same as `locate` with an explicit probe list.
pub fn locate_with(start: &Path, probes: &[&dyn Probe], ctx: &ProbeContext) -> String {
    let start = absolute_start(start);
    debug!("Searching for a repository from {}", start.display());

    let mut dir: &Path = &start;
    loop {
        trace!("Checking {}", dir.display());
        for probe in probes {
            if let ProbeOutcome::Matched(prompt) = probe.probe(dir, ctx) {
                return prompt;
            }
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
    }

    debug!("No repository found above {}", start.display());
    String::new()
}

/// Canonical form of `start` when it exists, otherwise a lexically absolute
/// path so that a missing directory still ascends into real ancestors.
fn absolute_start(start: &Path) -> PathBuf {
    start
        .canonicalize()
        .or_else(|_| std::path::absolute(start))
        .unwrap_or_else(|_| start.to_path_buf())
}
