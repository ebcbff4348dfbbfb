//! # vcprompt Filesystem Read Helpers
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Small read-only wrappers around `std::fs` used by the probes to pull
//! values out of VCS metadata files. vcprompt never writes to a repository.
//!
//! ## Architecture
//!
//! - **`read_file_to_string`**: `fs::read_to_string` with the path attached as error context.
//! - **`read_first_line`**: The first line of a file, trimmed. Errors if the file is empty.
//! - **`dir_name`**: The final component of a directory path, used as the branch name for VCSs without native branches.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! let revno = io::read_first_line(&dir.join(".bzr/branch/last-revision"))?;
//! let branch = io::dir_name(dir);
//! ```
//!
use crate::core::error::{Result, VcpromptError};
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be found, opened, or read, with
/// context indicating which file failed.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(VcpromptError::from)
        .with_context(|| format!("Failed to read file {:?}", path))
}

/// Reads the first line of a file with surrounding whitespace removed.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be read or its first line is blank.
pub fn read_first_line(path: &Path) -> Result<String> {
    let content = read_file_to_string(path)?;
    let line = content.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        anyhow::bail!(VcpromptError::UnexpectedFormat {
            what: path.display().to_string(),
            content,
        });
    }
    Ok(line.to_string())
}

/// Final path component of `dir`, or `None` for a filesystem root.
pub fn dir_name(dir: &Path) -> Option<String> {
    dir.file_name().map(|name| name.to_string_lossy().into_owned())
}
