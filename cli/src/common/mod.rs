//! # vcprompt Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared helpers used by the VCS probes, kept apart from the detection logic
//! in `vcs::` and the VCS-independent infrastructure in `core::`.
//!
//! ## Architecture
//!
//! - **`fs`**: Read-only filesystem helpers for metadata files.
//! - **`process`**: The `CommandRunner` abstraction over external VCS commands.
//!

/// Utilities for reading VCS metadata files.
pub mod fs;
/// Utilities for executing external VCS commands.
pub mod process;
