//! # vcprompt Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Entry point for filesystem helpers. Only read operations live here;
//! repositories are inspected, never modified.
//!
//! - **`io`**: Reading files and first lines, deriving directory names.
//!
pub mod io;
