//! # Mercurial Probe
//!
//! File: cli/src/vcs/hg.rs
//!
//! Branch comes from the first existing of `.hg/branch`, `.hg/undo.branch`
//! or `.hg/bookmarks.current`, which also serve as the membership marker.
//! Revision and hash come from the tags cache (`rev node` on its first line);
//! `%r` is the local revision number, `%h` the abbreviated node.
//!
use super::{leading_codes, short_hash, Probe, ProbeContext};
use crate::common::fs::io;
use crate::core::error::{Result, VcpromptError};
use std::path::{Path, PathBuf};

pub struct Mercurial;

const BRANCH_FILES: [&str; 3] = [".hg/branch", ".hg/undo.branch", ".hg/bookmarks.current"];
const TAG_CACHES: [&str; 2] = [".hg/tags.cache", ".hg/cache/tags2-visible"];

impl Probe for Mercurial {
    fn name(&self) -> &'static str {
        "hg"
    }

    fn claims(&self, dir: &Path) -> bool {
        branch_file(dir).is_some()
    }

    fn branch(&self, dir: &Path, _ctx: &ProbeContext) -> Result<Option<String>> {
        match branch_file(dir) {
            Some(file) => io::read_first_line(&file).map(Some),
            None => Ok(None),
        }
    }

    fn hash(&self, dir: &Path, _ctx: &ProbeContext) -> Result<Option<String>> {
        Ok(tip(dir)?.map(|(_, node)| short_hash(&node)))
    }

    fn revision(&self, dir: &Path, _ctx: &ProbeContext) -> Result<Option<String>> {
        Ok(tip(dir)?.map(|(rev, _)| rev))
    }

    fn status(&self, dir: &Path, ctx: &ProbeContext) -> Result<Option<String>> {
        let output = ctx
            .runner
            .run("hg", &["status"], dir)?
            .success_stdout("hg status")?;
        Ok(Some(parse_status(&output)))
    }
}

fn branch_file(dir: &Path) -> Option<PathBuf> {
    BRANCH_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// `(revision, node)` from the first tags cache present, if any.
fn tip(dir: &Path) -> Result<Option<(String, String)>> {
    match TAG_CACHES.iter().map(|name| dir.join(name)).find(|p| p.is_file()) {
        Some(cache) => parse_tags_cache(&io::read_file_to_string(&cache)?).map(Some),
        None => Ok(None),
    }
}

/// Parses the `rev node [...]` header line of a tags cache.
pub fn parse_tags_cache(content: &str) -> Result<(String, String)> {
    let mut words = content.lines().next().unwrap_or("").split_whitespace();
    match (words.next(), words.next()) {
        (Some(rev), Some(node)) if rev.chars().all(|c| c.is_ascii_digit()) => {
            Ok((rev.to_string(), node.to_string()))
        }
        _ => Err(VcpromptError::UnexpectedFormat {
            what: "hg tags cache".into(),
            content: content.to_string(),
        }
        .into()),
    }
}

/// Collects status codes from `hg status` output (`M file`, `A file`, ...).
pub fn parse_status(output: &str) -> String {
    leading_codes(output)
}
