//! # vcprompt VCS Probes (`vcs`)
//!
//! File: cli/src/vcs/mod.rs
//!
//! ## Overview
//!
//! A probe decides whether a directory is the root of a repository for one
//! particular VCS and, if so, renders the prompt template with that
//! repository's branch, hash, revision and status. This module defines the
//! `Probe` trait, the fixed registry of probes, and the rendering logic they
//! share.
//!
//! ## Architecture
//!
//! - `Probe`: membership check (`claims`) plus one method per extracted
//!   field. Fields a VCS cannot provide keep the default `Ok(None)`.
//! - `ProbeOutcome`: `NoMatch` or `Matched(prompt)`. A matched repository may
//!   legitimately render to an empty string (e.g. template `"%i"` on a clean
//!   tree), so the match signal is kept separate from the payload.
//! - `render`: resolves only the fields the template references, replaces
//!   failures with the configured unknown sentinel, and normalizes status.
//!   Commands are memoized for the render, so fields backed by the same
//!   command share one invocation.
//! - `registry`: the probes in priority order. When two probes claim the same
//!   directory the first one listed wins.
//!
//! Each submodule keeps its output parsers as small pure functions with their
//! own tests, so a format change in one VCS cannot leak into another.
//!
//! ## Usage
//!
//! ```rust
//! let ctx = ProbeContext { config: &cfg, runner: &SystemRunner };
//! for probe in vcs::registry() {
//!     if let ProbeOutcome::Matched(prompt) = probe.probe(dir, &ctx) {
//!         return prompt;
//!     }
//! }
//! ```
//!
use crate::common::process::{CommandRunner, MemoRunner};
use crate::core::config::PromptConfig;
use crate::core::error::Result;
use crate::core::format::{self, Token};
use crate::core::status;
use std::path::Path;
use tracing::debug;

pub mod bzr;
pub mod cvs;
pub mod darcs;
pub mod fossil;
pub mod git;
pub mod hg;
pub mod locator;
pub mod svn;

/// Content hashes are shown abbreviated to this many characters.
pub const SHORT_HASH_LEN: usize = 7;

/// Everything a probe needs besides the directory under inspection.
pub struct ProbeContext<'a> {
    pub config: &'a PromptConfig,
    pub runner: &'a dyn CommandRunner,
}

/// Result of asking one probe about one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    NoMatch,
    Matched(String),
}

/// One supported version control system.
///
/// Field methods return `Ok(None)` when the VCS has no such concept and
/// `Err` when extraction failed; both render as the unknown sentinel.
pub trait Probe: Sync {
    /// Literal substituted for `%s`.
    fn name(&self) -> &'static str;

    /// Cheap existence check for this VCS's marker inside `dir`.
    fn claims(&self, dir: &Path) -> bool;

    fn branch(&self, _dir: &Path, _ctx: &ProbeContext) -> Result<Option<String>> {
        Ok(None)
    }

    fn hash(&self, _dir: &Path, _ctx: &ProbeContext) -> Result<Option<String>> {
        Ok(None)
    }

    /// Defaults to the hash for VCSs without a separate revision concept.
    fn revision(&self, dir: &Path, ctx: &ProbeContext) -> Result<Option<String>> {
        self.hash(dir, ctx)
    }

    /// Raw, un-normalized status codes.
    fn status(&self, _dir: &Path, _ctx: &ProbeContext) -> Result<Option<String>> {
        Ok(None)
    }

    /// Checks membership and, on a match, renders the configured template.
    fn probe(&self, dir: &Path, ctx: &ProbeContext) -> ProbeOutcome {
        if !self.claims(dir) {
            return ProbeOutcome::NoMatch;
        }
        debug!("{} repository found at {}", self.name(), dir.display());
        ProbeOutcome::Matched(render(self, dir, ctx))
    }
}

/// Renders `ctx.config.format` for a repository rooted at `dir`.
pub fn render<P: Probe + ?Sized>(probe: &P, dir: &Path, ctx: &ProbeContext) -> String {
    let memo = MemoRunner::new(ctx.runner);
    let ctx = &ProbeContext {
        config: ctx.config,
        runner: &memo,
    };
    let unknown = &ctx.config.unknown;
    format::interpolate(&ctx.config.format, |token| {
        let value = match token {
            Token::System => return probe.name().to_string(),
            Token::Branch => probe.branch(dir, ctx),
            Token::Hash => probe.hash(dir, ctx),
            Token::Revision => probe.revision(dir, ctx),
            Token::Status => probe.status(dir, ctx).map(|codes| {
                codes.map(|codes| status::normalize(&codes, ctx.config.unique_status))
            }),
        };
        match value {
            Ok(Some(value)) => value,
            Ok(None) => unknown.clone(),
            Err(e) => {
                debug!(
                    "{}: could not resolve {}: {:#}",
                    probe.name(),
                    token.placeholder(),
                    e
                );
                unknown.clone()
            }
        }
    })
}

static PROBES: [&dyn Probe; 7] = [
    &bzr::Bazaar,
    &cvs::Cvs,
    &darcs::Darcs,
    &fossil::Fossil,
    &git::Git,
    &hg::Mercurial,
    &svn::Subversion,
];

/// All probes in priority order.
pub fn registry() -> &'static [&'static dyn Probe] {
    &PROBES
}

/// Abbreviates a content hash.
pub fn short_hash(id: &str) -> String {
    id.trim().chars().take(SHORT_HASH_LEN).collect()
}

/// Concatenates the first whitespace-separated word of every line.
///
/// This is the shape of `git status --short`, `hg status` and `darcs whatsnew`
/// output, where each line starts with the file's status marker.
pub fn leading_codes(output: &str) -> String {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect()
}
