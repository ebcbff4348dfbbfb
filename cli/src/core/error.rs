//! # vcprompt Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used while extracting repository
//! metadata. Errors never reach the user: a probe converts a failed field
//! extraction into the configured "unknown" sentinel, and the locator treats
//! "not a repository" as the normal reason to keep ascending.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `VcpromptError`: A custom error enum using `thiserror` for specific failure kinds
//! - `Result<T>`: A type alias for `anyhow::Result<T>` so callers can attach context
//!
//! The error types cover:
//! - Reading VCS metadata files
//! - Querying Fossil's SQLite databases
//! - Running external VCS commands
//! - Metadata that exists but does not have the expected shape
//!
//! ## Examples
//!
//! ```rust
//! let head = fs::read_to_string(&head_path)
//!     .with_context(|| format!("Failed to read {}", head_path.display()))?;
//!
//! let Some(rest) = head.strip_prefix("ref: ") else {
//!     return Err(VcpromptError::UnexpectedFormat {
//!         what: "git HEAD".into(),
//!         content: head,
//!     })?;
//! };
//! ```
//!
use thiserror::Error;

/// Custom error type for vcprompt field extraction.
#[derive(Error, Debug)]
pub enum VcpromptError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("SQLite query failed: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    #[error("External command failed: {cmd}, Status: {status}")]
    ExternalCommand { cmd: String, status: String },

    #[error("Unexpected {what} contents: {content:?}")]
    UnexpectedFormat { what: String, content: String },

    #[error("{0} not found")]
    NotFound(String),
}

/// Type alias for Result using anyhow::Error so context can be attached freely.
pub type Result<T> = anyhow::Result<T>;
