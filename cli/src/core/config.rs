//! # vcprompt Configuration
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module builds the `PromptConfig` that the locator and probes consume.
//! There are no configuration files: the only inputs are command-line values
//! and two environment variables.
//!
//! ## Architecture
//!
//! Sources, in order of precedence:
//! 1. `--format` flag, then the positional `FORMAT` argument
//! 2. `VCPROMPT_FORMAT` / `VCPROMPT_UNKNOWN` environment variables (empty values ignored)
//! 3. Default values defined in this module
//!
//! The environment is read exactly once, by `PromptConfig::resolve`, through a
//! lookup function. `main` passes a closure over `std::env::var`; tests pass a
//! closure over a fixed map so they never touch the process environment.
//!
//! ## Examples
//!
//! ```rust
//! let cfg = PromptConfig::resolve(cli_format, unique_status, |key| std::env::var(key).ok());
//! let prompt = locator::locate(&path, &cfg, &SystemRunner);
//! ```
//!
use tracing::debug;

/// Template used when neither the command line nor the environment supplies one.
pub const DEFAULT_FORMAT: &str = "%s:%b";
/// Sentinel substituted for fields that could not be determined.
pub const DEFAULT_UNKNOWN: &str = "(unknown)";

/// Environment variable overriding the default template.
pub const FORMAT_ENV: &str = "VCPROMPT_FORMAT";
/// Environment variable overriding the unknown sentinel.
pub const UNKNOWN_ENV: &str = "VCPROMPT_UNKNOWN";

/// Settings shared by every probe for a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    /// The format template, e.g. `"%s:%b"`.
    pub format: String,
    /// Text used for any field that is unsupported or failed to resolve.
    pub unknown: String,
    /// Collapse repeated status codes when rendering `%i`.
    pub unique_status: bool,
}

impl Default for PromptConfig {
    fn default() -> Self {
        PromptConfig {
            format: DEFAULT_FORMAT.to_string(),
            unknown: DEFAULT_UNKNOWN.to_string(),
            unique_status: false,
        }
    }
}

impl PromptConfig {
    /// Builds the configuration from an explicit format (if the user gave one)
    /// and an environment lookup.
    pub fn resolve<F>(format: Option<String>, unique_status: bool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let format = format
            .or_else(|| non_empty(FORMAT_ENV))
            .unwrap_or_else(|| DEFAULT_FORMAT.to_string());
        let unknown = non_empty(UNKNOWN_ENV).unwrap_or_else(|| DEFAULT_UNKNOWN.to_string());

        let config = PromptConfig {
            format,
            unknown,
            unique_status,
        };
        debug!("Resolved prompt configuration: {:?}", config);
        config
    }
}

#[cfg(test)]
impl PromptConfig {
    /// Default configuration with a different template.
    pub fn with_format(format: &str) -> Self {
        PromptConfig {
            format: format.to_string(),
            ..Default::default()
        }
    }
}
