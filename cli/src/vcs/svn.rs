//! # Subversion Probe
//!
//! File: cli/src/vcs/svn.rs
//!
//! ## Overview
//!
//! Working copies are recognised by `.svn/entries` (pre-1.7 layout) or
//! `.svn/wc.db`. Branch and revision are parsed from `svn info <dir>`, status
//! from `svn status`.
//!
//! Subversion has one global revision number and no separate short hash, so
//! `%h` and `%r` both render that number. `%b`, `%h` and `%r` all come from
//! the same `svn info` run.
//!
use super::{Probe, ProbeContext};
use crate::core::error::Result;
use regex::Regex;
use std::path::Path;

pub struct Subversion;

const MARKERS: [&str; 2] = [".svn/entries", ".svn/wc.db"];

/// Fields parsed from `svn info` output.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SvnInfo {
    pub branch: Option<String>,
    pub revision: Option<String>,
}

impl Probe for Subversion {
    fn name(&self) -> &'static str {
        "svn"
    }

    fn claims(&self, dir: &Path) -> bool {
        MARKERS.iter().any(|marker| dir.join(marker).exists())
    }

    fn branch(&self, dir: &Path, ctx: &ProbeContext) -> Result<Option<String>> {
        Ok(info(dir, ctx)?.branch)
    }

    fn hash(&self, dir: &Path, ctx: &ProbeContext) -> Result<Option<String>> {
        self.revision(dir, ctx)
    }

    fn revision(&self, dir: &Path, ctx: &ProbeContext) -> Result<Option<String>> {
        Ok(info(dir, ctx)?.revision)
    }

    fn status(&self, dir: &Path, ctx: &ProbeContext) -> Result<Option<String>> {
        let output = ctx
            .runner
            .run("svn", &["status"], dir)?
            .success_stdout("svn status")?;
        Ok(Some(parse_status(&output)?))
    }
}

fn info(dir: &Path, ctx: &ProbeContext) -> Result<SvnInfo> {
    let target = dir.to_string_lossy();
    let output = ctx
        .runner
        .run("svn", &["info", &target], dir)?
        .success_stdout("svn info")?;
    parse_info(&output)
}

/// Parses the `URL:` and `Revision:` lines of `svn info`.
///
/// The branch is `trunk`, or the name following `branches/` or `tags/`. A
/// URL ending at `branches` or `tags` yields that keyword.
pub fn parse_info(output: &str) -> Result<SvnInfo> {
    let url_re = Regex::new(r"/(trunk|branches|tags)(?:/([^/\s]+))?")?;
    let revision_re = Regex::new(r"^Revision: (\d+)")?;

    let mut info = SvnInfo::default();
    for line in output.lines() {
        if let Some(url) = line.strip_prefix("URL:") {
            info.branch = url_re.captures(url).map(|caps| match (&caps[1], caps.get(2)) {
                ("trunk", _) | (_, None) => caps[1].to_string(),
                (_, Some(name)) => name.as_str().to_string(),
            });
        } else if let Some(caps) = revision_re.captures(line) {
            info.revision = Some(caps[1].to_string());
        }
    }
    Ok(info)
}

/// Collects the first status column of `svn status` output.
///
/// Only lines in the fixed-column item layout count (seven status columns,
/// then a space). Headers such as `Performing status on external item at
/// 'lib':` and changelist banners are skipped.
pub fn parse_status(output: &str) -> Result<String> {
    let item_re = Regex::new(r"^([A-Z?!~])[ A-Z?!~+*]{6} ")?;
    Ok(output
        .lines()
        .filter_map(|line| item_re.captures(line))
        .map(|caps| caps[1].to_string())
        .collect())
}
