//! # Darcs Probe
//!
//! File: cli/src/vcs/darcs.rs
//!
//! Darcs has no in-repository branches, so the directory name stands in for
//! the branch. The hash is taken from the `size-hash` first line of
//! `_darcs/hashed_inventory`.
//!
use super::{leading_codes, short_hash, Probe, ProbeContext};
use crate::common::fs::io;
use crate::core::error::{Result, VcpromptError};
use std::path::Path;

pub struct Darcs;

const INVENTORY: &str = "_darcs/hashed_inventory";

impl Probe for Darcs {
    fn name(&self) -> &'static str {
        "darcs"
    }

    fn claims(&self, dir: &Path) -> bool {
        dir.join(INVENTORY).exists()
    }

    fn branch(&self, dir: &Path, _ctx: &ProbeContext) -> Result<Option<String>> {
        Ok(io::dir_name(dir))
    }

    fn hash(&self, dir: &Path, _ctx: &ProbeContext) -> Result<Option<String>> {
        let inventory = io::read_file_to_string(&dir.join(INVENTORY))?;
        parse_inventory_hash(&inventory).map(|hash| Some(short_hash(&hash)))
    }

    fn status(&self, dir: &Path, ctx: &ProbeContext) -> Result<Option<String>> {
        let output = ctx
            .runner
            .run("darcs", &["whatsnew", "--summary", "--look-for-adds"], dir)?;
        // darcs exits 1 on a clean tree.
        if output.code == Some(1) && output.stdout.contains("No changes") {
            return Ok(Some(String::new()));
        }
        let stdout = output.success_stdout("darcs whatsnew")?;
        Ok(Some(parse_status(&stdout)))
    }
}

/// Extracts the hash from the `<size>-<hash>` first line of an inventory.
pub fn parse_inventory_hash(inventory: &str) -> Result<String> {
    let first = inventory.lines().next().unwrap_or("").trim();
    match first.split('-').collect::<Vec<_>>().as_slice() {
        [size, hash] if !size.is_empty() && !hash.is_empty() => Ok(hash.to_string()),
        _ => Err(VcpromptError::UnexpectedFormat {
            what: "darcs inventory".into(),
            content: first.to_string(),
        }
        .into()),
    }
}

/// Collects codes from `darcs whatsnew --summary` lines such as `M ./a -1 +2`
/// or `a ./untracked`.
pub fn parse_status(output: &str) -> String {
    leading_codes(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::process::testing::ScriptedRunner;
    use crate::core::config::PromptConfig;
    use crate::vcs::testing::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn repo(inventory: &str) -> TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("_darcs")).unwrap();
        fs::write(dir.path().join(INVENTORY), inventory).unwrap();
        dir
    }

    #[test]
    fn test_hash_from_inventory() {
        let dir = repo("0000000143-5d4c3b2a19f8e7d6c5b4a39281706f5e4d3c2b1a09f8e7d6c5b4a3928170\n[patch\n");
        assert_eq!(render_format(&Darcs, dir.path(), "%s %h %r"), matched("darcs 5d4c3b2 5d4c3b2"));
    }

    #[test]
    fn test_unreadable_inventory_format() {
        let dir = repo("pristine:abcdef\n");
        let config = PromptConfig {
            unknown: "-".into(),
            ..PromptConfig::with_format("%h")
        };
        let out = probe_with(&Darcs, dir.path(), &config, &ScriptedRunner::new());
        assert_eq!(out, matched("-"));
    }

    #[test]
    fn test_branch_is_directory_name() {
        let dir = repo("1-a\n");
        let name = io::dir_name(dir.path()).unwrap();
        assert_eq!(render_format(&Darcs, dir.path(), "%b"), matched(&name));
    }

    #[test]
    fn test_status_lowercase_first() {
        let dir = repo("1-a\n");
        let runner = ScriptedRunner::new().reply(
            "darcs whatsnew --summary --look-for-adds",
            0,
            "M ./src/a.hs -1 +2\nA ./src/b.hs\na ./notes.txt\n",
        );
        let out = probe_with(&Darcs, dir.path(), &PromptConfig::with_format("%i"), &runner);
        assert_eq!(out, matched("aMA"));
    }

    #[test]
    fn test_clean_tree_is_empty_status() {
        let dir = repo("1-a\n");
        let runner = ScriptedRunner::new().reply(
            "darcs whatsnew --summary --look-for-adds",
            1,
            "No changes!\n",
        );
        let out = probe_with(&Darcs, dir.path(), &PromptConfig::with_format("[%i]"), &runner);
        assert_eq!(out, matched("[]"));
    }

    #[test]
    fn test_parse_inventory_hash() {
        assert_eq!(parse_inventory_hash("12-abc").unwrap(), "abc");
        assert!(parse_inventory_hash("12-abc-def").is_err());
        assert!(parse_inventory_hash("").is_err());
    }
}
