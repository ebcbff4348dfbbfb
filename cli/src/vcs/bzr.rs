//! # Bazaar Probe
//!
//! File: cli/src/vcs/bzr.rs
//!
//! Bazaar branches live in their own directories, so the directory name is
//! reported as the branch. The revision number is the first word of
//! `.bzr/branch/last-revision` (`<revno> <revision-id>`) and is shown in full
//! for both `%h` and `%r`.
//!
use super::{Probe, ProbeContext};
use crate::common::fs::io;
use crate::core::error::Result;
use std::path::Path;

pub struct Bazaar;

const LAST_REVISION: &str = ".bzr/branch/last-revision";

/// Section headers printed by `bzr status` and the code each one contributes.
const STATUS_HEADERS: [(&str, char); 7] = [
    ("added", 'A'),
    ("modified", 'M'),
    ("removed", 'R'),
    ("renamed", 'V'),
    ("kind changed", 'K'),
    ("conflicts", 'C'),
    ("unknown", '?'),
];

impl Probe for Bazaar {
    fn name(&self) -> &'static str {
        "bzr"
    }

    fn claims(&self, dir: &Path) -> bool {
        dir.join(LAST_REVISION).exists()
    }

    fn branch(&self, dir: &Path, _ctx: &ProbeContext) -> Result<Option<String>> {
        Ok(io::dir_name(dir))
    }

    fn hash(&self, dir: &Path, _ctx: &ProbeContext) -> Result<Option<String>> {
        let line = io::read_first_line(&dir.join(LAST_REVISION))?;
        Ok(line.split_whitespace().next().map(str::to_string))
    }

    fn status(&self, dir: &Path, ctx: &ProbeContext) -> Result<Option<String>> {
        let output = ctx
            .runner
            .run("bzr", &["status"], dir)?
            .success_stdout("bzr status")?;
        Ok(Some(parse_status(&output)))
    }
}

/// Maps each recognised section header of `bzr status` output to its code.
/// File lines below a header are indented and carry no code themselves.
pub fn parse_status(output: &str) -> String {
    output
        .lines()
        .filter_map(|line| line.trim().split_once(':'))
        .filter_map(|(header, _)| {
            STATUS_HEADERS
                .iter()
                .find(|(name, _)| *name == header)
                .map(|(_, code)| *code)
        })
        .collect()
}
