//! # vcprompt Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Probes ask the VCS itself for working-tree status (`git status --short`,
//! `hg status`, ...) and, for Subversion, for branch and revision
//! (`svn info`). This module wraps `std::process::Command` behind the
//! `CommandRunner` trait so those invocations can be scripted in tests.
//!
//! ## Architecture
//!
//! - **`CommandRunner`**: runs a program with arguments in a working directory and returns its captured stdout and exit code.
//! - **`SystemRunner`**: the real implementation. Stdin is closed and stderr is discarded so nothing leaks into the prompt.
//! - **`CommandOutput::success_stdout`**: turns a non-zero exit into `VcpromptError::ExternalCommand`.
//! - **`MemoRunner`**: wraps another runner for the duration of one render so a command shared by several fields (`svn info` for `%b` and `%r`) runs once.
//!
//! Commands block until the child exits. There is no timeout.
//!
//! ## Usage
//!
//! ```rust
//! let out = runner.run("hg", &["status"], repo_root)?.success_stdout("hg status")?;
//! ```
//!
use crate::core::error::{Result, VcpromptError};
use anyhow::{anyhow, Context};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Captured result of an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Standard output, lossily decoded as UTF-8.
    pub stdout: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Returns stdout when the command exited with status 0.
    pub fn success_stdout(self, cmd: &str) -> Result<String> {
        if self.success() {
            Ok(self.stdout)
        } else {
            Err(VcpromptError::ExternalCommand {
                cmd: cmd.to_string(),
                status: match self.code {
                    Some(code) => format!("exit status: {}", code),
                    None => "terminated by signal".to_string(),
                },
            }
            .into())
        }
    }
}

/// Runs external programs on behalf of the probes.
pub trait CommandRunner {
    /// Runs `program` with `args` inside `cwd` and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if the program cannot be spawned (e.g. not installed).
    /// A non-zero exit is *not* an error here; see `CommandOutput::success_stdout`.
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput>;
}

/// `CommandRunner` backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        debug!("Running `{} {}` in {}", program, args.join(" "), cwd.display());
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .with_context(|| format!("Failed to run `{}`", program))?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        };
        debug!("`{}` exited with {:?}", program, result.code);
        Ok(result)
    }
}

type CommandKey = (String, Vec<String>, PathBuf);

/// Remembers the outcome of every command it runs. Spawn failures are
/// remembered too, as their message.
pub struct MemoRunner<'a> {
    inner: &'a dyn CommandRunner,
    seen: RefCell<HashMap<CommandKey, std::result::Result<CommandOutput, String>>>,
}

impl<'a> MemoRunner<'a> {
    pub fn new(inner: &'a dyn CommandRunner) -> Self {
        MemoRunner {
            inner,
            seen: RefCell::new(HashMap::new()),
        }
    }
}

impl CommandRunner for MemoRunner<'_> {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        let key: CommandKey = (
            program.to_string(),
            args.iter().map(|arg| arg.to_string()).collect(),
            cwd.to_path_buf(),
        );
        if let Some(previous) = self.seen.borrow().get(&key) {
            debug!("Reusing output of `{} {}`", program, args.join(" "));
            return previous.clone().map_err(|msg| anyhow!(msg));
        }
        let outcome = self
            .inner
            .run(program, args, cwd)
            .map_err(|e| format!("{:#}", e));
        self.seen.borrow_mut().insert(key, outcome.clone());
        outcome.map_err(|msg| anyhow!(msg))
    }
}
