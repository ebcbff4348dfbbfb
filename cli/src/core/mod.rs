//! # vcprompt Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the VCS-independent building blocks of vcprompt.
//!
//! ## Architecture
//!
//! - `config`: The `PromptConfig` built once per invocation
//! - `error`: Error types and the crate `Result` alias
//! - `format`: Template token substitution
//! - `status`: Status code normalization
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config::PromptConfig;
//! use crate::core::error::{Result, VcpromptError};
//! use crate::core::format::{self, Token};
//! use crate::core::status;
//! ```
//!
pub mod config;
pub mod error;
pub mod format;
pub mod status;
