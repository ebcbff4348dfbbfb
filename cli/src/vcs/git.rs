//! # Git Probe
//!
//! File: cli/src/vcs/git.rs
//!
//! ## Overview
//!
//! Reads branch and commit straight from the `.git` directory, without
//! spawning `git`, and only runs `git status --short` when `%i` is requested.
//!
//! ## Details
//!
//! - **Marker**: a `.git` directory, or a `.git` file holding
//!   `gitdir: <path>` as created for worktrees and submodules.
//! - **Branch**: `HEAD` containing `ref: refs/heads/<name>` yields `<name>`.
//!   With a detached `HEAD`, the first local branch (sorted, nested names
//!   such as `feature/x` included) is reported.
//! - **Hash**: the branch's loose ref file, falling back to `packed-refs`,
//!   or the detached `HEAD` commit itself, abbreviated to 7 characters.
//!   `%r` shows the same value.
//! - **Status**: first word of each `git status --short` line.
//!
use super::{leading_codes, short_hash, Probe, ProbeContext};
use crate::common::fs::io;
use crate::core::error::{Result, VcpromptError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub struct Git;

/// What `HEAD` points at.
#[derive(Debug, PartialEq, Eq)]
pub enum Head {
    Branch(String),
    Detached(String),
}

impl Probe for Git {
    fn name(&self) -> &'static str {
        "git"
    }

    fn claims(&self, dir: &Path) -> bool {
        git_dir(dir).is_some()
    }

    fn branch(&self, dir: &Path, _ctx: &ProbeContext) -> Result<Option<String>> {
        let git_dir = require_git_dir(dir)?;
        match read_head(&git_dir)? {
            Head::Branch(name) => Ok(Some(name)),
            Head::Detached(_) => first_local_branch(&refs_root(&git_dir)),
        }
    }

    fn hash(&self, dir: &Path, _ctx: &ProbeContext) -> Result<Option<String>> {
        let git_dir = require_git_dir(dir)?;
        let commit = match read_head(&git_dir)? {
            Head::Branch(name) => resolve_ref(&refs_root(&git_dir), &format!("refs/heads/{}", name))?,
            Head::Detached(commit) => Some(commit),
        };
        Ok(commit.map(|c| short_hash(&c)))
    }

    fn status(&self, dir: &Path, ctx: &ProbeContext) -> Result<Option<String>> {
        let output = ctx
            .runner
            .run("git", &["status", "--short"], dir)?
            .success_stdout("git status --short")?;
        Ok(Some(parse_status(&output)))
    }
}

/// Locates the git directory for a work tree rooted at `dir`.
pub fn git_dir(dir: &Path) -> Option<PathBuf> {
    let dot_git = dir.join(".git");
    if dot_git.is_dir() {
        return Some(dot_git);
    }
    if !dot_git.is_file() {
        return None;
    }
    let content = fs::read_to_string(&dot_git).ok()?;
    let target = content.trim().strip_prefix("gitdir:")?.trim();
    let resolved = dir.join(target);
    if resolved.is_dir() {
        Some(resolved)
    } else {
        debug!("{} points at missing {}", dot_git.display(), resolved.display());
        None
    }
}

fn require_git_dir(dir: &Path) -> Result<PathBuf> {
    git_dir(dir).ok_or_else(|| VcpromptError::NotFound(format!("git directory in {}", dir.display())).into())
}

/// Linked worktrees keep their refs in the directory named by `commondir`.
fn refs_root(git_dir: &Path) -> PathBuf {
    match io::read_first_line(&git_dir.join("commondir")) {
        Ok(common) => git_dir.join(common),
        Err(_) => git_dir.to_path_buf(),
    }
}

fn read_head(git_dir: &Path) -> Result<Head> {
    parse_head(&io::read_file_to_string(&git_dir.join("HEAD"))?)
}

/// Parses the contents of a `HEAD` file.
pub fn parse_head(content: &str) -> Result<Head> {
    let line = content.trim();
    if let Some(reference) = line.strip_prefix("ref:") {
        if let Some(name) = reference.trim().strip_prefix("refs/heads/") {
            if !name.is_empty() {
                return Ok(Head::Branch(name.to_string()));
            }
        }
    } else if line.len() >= 7 && line.chars().all(|c| c.is_ascii_hexdigit()) {
        return Ok(Head::Detached(line.to_string()));
    }
    Err(VcpromptError::UnexpectedFormat {
        what: "git HEAD".into(),
        content: content.to_string(),
    }
    .into())
}

/// Looks `reference` up as a loose ref first, then in `packed-refs`.
fn resolve_ref(refs_root: &Path, reference: &str) -> Result<Option<String>> {
    let loose = refs_root.join(reference);
    if loose.is_file() {
        return io::read_first_line(&loose).map(Some);
    }
    let packed = refs_root.join("packed-refs");
    if !packed.is_file() {
        return Ok(None);
    }
    Ok(find_packed_ref(&io::read_file_to_string(&packed)?, reference))
}

/// Finds the commit for `reference` in the contents of a `packed-refs` file.
pub fn find_packed_ref(packed: &str, reference: &str) -> Option<String> {
    packed
        .lines()
        .filter(|line| !line.starts_with('#') && !line.starts_with('^'))
        .filter_map(|line| line.split_once(' '))
        .find(|(_, name)| name.trim() == reference)
        .map(|(commit, _)| commit.to_string())
}

fn first_local_branch(refs_root: &Path) -> Result<Option<String>> {
    let heads = refs_root.join("refs/heads");
    if !heads.is_dir() {
        return Ok(None);
    }
    let mut names = Vec::new();
    for entry in WalkDir::new(&heads).min_depth(1) {
        let entry = entry.map_err(|e| VcpromptError::from(std::io::Error::from(e)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(&heads) {
            let parts: Vec<_> = relative
                .components()
                .map(|part| part.as_os_str().to_string_lossy().into_owned())
                .collect();
            names.push(parts.join("/"));
        }
    }
    names.sort();
    Ok(names.into_iter().next())
}

/// Collects status codes from `git status --short` output.
pub fn parse_status(output: &str) -> String {
    leading_codes(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::process::testing::ScriptedRunner;
    use crate::core::config::PromptConfig;
    use crate::vcs::testing::*;
    use crate::vcs::ProbeOutcome;
    use tempfile::{tempdir, TempDir};

    const COMMIT: &str = "8f3c2a9d1e0b7c6a5f4e3d2c1b0a998877665544";

    fn repo_on_branch(branch: &str) -> TempDir {
        let dir = tempdir().unwrap();
        let git = dir.path().join(".git");
        fs::create_dir_all(git.join("refs/heads").join(branch).parent().unwrap()).unwrap();
        fs::write(git.join("HEAD"), format!("ref: refs/heads/{}\n", branch)).unwrap();
        fs::write(git.join("refs/heads").join(branch), format!("{}\n", COMMIT)).unwrap();
        dir
    }

    #[test]
    fn test_branch_and_name() {
        let repo = repo_on_branch("main");
        assert_eq!(render_format(&Git, repo.path(), "%s:%b"), matched("git:main"));
    }

    #[test]
    fn test_branch_with_slashes_kept_whole() {
        let repo = repo_on_branch("feature/login");
        assert_eq!(render_format(&Git, repo.path(), "%b"), matched("feature/login"));
    }

    #[test]
    fn test_hash_and_revision_are_short_commit() {
        let repo = repo_on_branch("main");
        assert_eq!(render_format(&Git, repo.path(), "%h %r"), matched("8f3c2a9 8f3c2a9"));
    }

    #[test]
    fn test_hash_from_packed_refs() {
        let dir = tempdir().unwrap();
        let git = dir.path().join(".git");
        fs::create_dir_all(git.join("refs/heads")).unwrap();
        fs::write(git.join("HEAD"), "ref: refs/heads/release\n").unwrap();
        fs::write(
            git.join("packed-refs"),
            format!(
                "# pack-refs with: peeled fully-peeled sorted\n\
                 1111111111111111111111111111111111111111 refs/heads/main\n\
                 {} refs/heads/release\n\
                 ^2222222222222222222222222222222222222222\n",
                COMMIT
            ),
        )
        .unwrap();
        assert_eq!(render_format(&Git, dir.path(), "%h"), matched("8f3c2a9"));
    }

    #[test]
    fn test_detached_head() {
        let repo = repo_on_branch("main");
        fs::write(repo.path().join(".git/HEAD"), "0123456789abcdef0123456789abcdef01234567\n").unwrap();
        assert_eq!(render_format(&Git, repo.path(), "%b@%h"), matched("main@0123456"));
    }

    #[test]
    fn test_detached_head_with_only_nested_branches() {
        let repo = repo_on_branch("feature/x");
        fs::create_dir_all(repo.path().join(".git/refs/heads/team/y")).unwrap();
        fs::write(repo.path().join(".git/refs/heads/team/y/z"), format!("{}\n", COMMIT)).unwrap();
        fs::write(repo.path().join(".git/HEAD"), format!("{}\n", COMMIT)).unwrap();
        assert_eq!(render_format(&Git, repo.path(), "%b@%h"), matched("feature/x@8f3c2a9"));
    }

    #[test]
    fn test_unborn_branch_hash_unknown() {
        let dir = tempdir().unwrap();
        let git = dir.path().join(".git");
        fs::create_dir_all(git.join("refs/heads")).unwrap();
        fs::write(git.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        assert_eq!(render_format(&Git, dir.path(), "%b %h"), matched("main (unknown)"));
    }

    #[test]
    fn test_missing_head_degrades_to_sentinel() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let config = PromptConfig {
            unknown: "N/A".into(),
            ..PromptConfig::with_format("%s:%b:%h")
        };
        let out = probe_with(&Git, dir.path(), &config, &ScriptedRunner::new());
        assert_eq!(out, matched("git:N/A:N/A"));
    }

    #[test]
    fn test_gitdir_file() {
        let main = repo_on_branch("wt");
        let work = tempdir().unwrap();
        fs::write(
            work.path().join(".git"),
            format!("gitdir: {}\n", main.path().join(".git").display()),
        )
        .unwrap();
        assert_eq!(render_format(&Git, work.path(), "%b"), matched("wt"));
    }

    #[test]
    fn test_worktree_commondir() {
        let main = repo_on_branch("main");
        let worktree_git = main.path().join(".git/worktrees/topic");
        fs::create_dir_all(&worktree_git).unwrap();
        fs::write(worktree_git.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        fs::write(worktree_git.join("commondir"), "../..\n").unwrap();

        let work = tempdir().unwrap();
        fs::write(
            work.path().join(".git"),
            format!("gitdir: {}\n", worktree_git.display()),
        )
        .unwrap();
        assert_eq!(render_format(&Git, work.path(), "%b %h"), matched("main 8f3c2a9"));
    }

    #[test]
    fn test_bad_gitdir_file_is_no_match() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".git"), "not a pointer").unwrap();
        assert_eq!(render_format(&Git, dir.path(), "%s"), ProbeOutcome::NoMatch);
    }

    #[test]
    fn test_status_from_command() {
        let repo = repo_on_branch("main");
        let runner = ScriptedRunner::new().reply(
            "git status --short",
            0,
            " M src/main.rs\nA  new.rs\nMM both.rs\n?? scratch.txt\n",
        );
        let out = probe_with(&Git, repo.path(), &PromptConfig::with_format("[%i]"), &runner);
        assert_eq!(out, matched("[MAMM]"));
    }

    #[test]
    fn test_status_failure_is_unknown() {
        let repo = repo_on_branch("main");
        let runner = ScriptedRunner::new().reply("git status --short", 128, "");
        let out = probe_with(&Git, repo.path(), &PromptConfig::with_format("%b %i"), &runner);
        assert_eq!(out, matched("main (unknown)"));
    }

    #[test]
    fn test_no_status_command_without_token() {
        let repo = repo_on_branch("main");
        let runner = ScriptedRunner::new();
        probe_with(&Git, repo.path(), &PromptConfig::with_format("%s:%b %h %r"), &runner);
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn test_parse_head() {
        assert_eq!(parse_head("ref: refs/heads/dev\n").unwrap(), Head::Branch("dev".into()));
        assert_eq!(parse_head("abcdef0\n").unwrap(), Head::Detached("abcdef0".into()));
        assert!(parse_head("ref: refs/remotes/origin/main").is_err());
        assert!(parse_head("garbage").is_err());
    }

    #[test]
    fn test_find_packed_ref() {
        let packed = "abc refs/heads/a\ndef refs/heads/b\n";
        assert_eq!(find_packed_ref(packed, "refs/heads/b").as_deref(), Some("def"));
        assert_eq!(find_packed_ref(packed, "refs/heads/c"), None);
    }
}
