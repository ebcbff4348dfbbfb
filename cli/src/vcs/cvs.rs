//! # CVS Probe
//!
//! File: cli/src/vcs/cvs.rs
//!
//! A `CVS/` administrative directory marks a checkout. The only field available
//! offline is the sticky tag in `CVS/Tag`; revisions are per file and status
//! would require contacting the server, so those render as unknown.
//!
use super::{Probe, ProbeContext};
use crate::common::fs::io;
use crate::core::error::Result;
use std::path::Path;

pub struct Cvs;

impl Probe for Cvs {
    fn name(&self) -> &'static str {
        "cvs"
    }

    fn claims(&self, dir: &Path) -> bool {
        dir.join("CVS").is_dir()
    }

    fn branch(&self, dir: &Path, _ctx: &ProbeContext) -> Result<Option<String>> {
        let tag_file = dir.join("CVS/Tag");
        if !tag_file.is_file() {
            return Ok(None);
        }
        Ok(parse_sticky_tag(&io::read_first_line(&tag_file)?))
    }
}

/// Strips the type prefix from a `CVS/Tag` line: `T` branch, `N` non-branch
/// tag, `D` sticky date.
pub fn parse_sticky_tag(line: &str) -> Option<String> {
    let name = line.strip_prefix(&['T', 'N', 'D'][..])?;
    (!name.is_empty()).then(|| name.to_string())
}
