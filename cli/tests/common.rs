//! # vcprompt CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`: a constructor for
//! the compiled `vcprompt` binary with a clean environment, and builders for
//! throwaway repositories laid out on disk the way each VCS leaves them.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;

/// # Get vcprompt Command (`vcprompt_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `vcprompt` binary with
/// the vcprompt environment variables and `RUST_LOG` removed, so the host
/// shell's settings cannot leak into assertions.
///
/// ## Panics
/// Panics if the `vcprompt` binary cannot be found via `Command::cargo_bin`.
pub fn vcprompt_cmd() -> Command {
    let mut cmd = Command::cargo_bin("vcprompt").expect("Failed to find vcprompt binary for testing");
    cmd.env_remove("VCPROMPT_FORMAT")
        .env_remove("VCPROMPT_UNKNOWN")
        .env_remove("RUST_LOG");
    cmd
}

/// Lays out a minimal `.git` directory on `branch` at `commit`.
pub fn init_git(root: &Path, branch: &str, commit: &str) {
    let git = root.join(".git");
    fs::create_dir_all(git.join("refs/heads")).unwrap();
    fs::write(git.join("HEAD"), format!("ref: refs/heads/{}\n", branch)).unwrap();
    fs::write(git.join("refs/heads").join(branch), format!("{}\n", commit)).unwrap();
}

/// Lays out a Mercurial `.hg` directory on `branch`.
pub fn init_hg(root: &Path, branch: &str) {
    fs::create_dir_all(root.join(".hg")).unwrap();
    fs::write(root.join(".hg/branch"), format!("{}\n", branch)).unwrap();
}

/// Lays out a Bazaar branch at revision `revno`.
pub fn init_bzr(root: &Path, revno: u32) {
    fs::create_dir_all(root.join(".bzr/branch")).unwrap();
    fs::write(
        root.join(".bzr/branch/last-revision"),
        format!("{} dev@example.com-20240101120000-0123456789abcdef\n", revno),
    )
    .unwrap();
}

/// Final path component of `path` as a `String`.
pub fn dir_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}
