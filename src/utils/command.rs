//! Command execution primitives with consistent error handling.
//!
//! All subprocess execution goes through the [`ProcessRunner`] trait so
//! orchestration logic can be tested against a recording fake without
//! spawning real processes.

use std::path::Path;
use std::process::Command;

use serde::Serialize;

use crate::core::error::{Error, Result};

/// Captured output from command execution.
/// Reusable primitive for any command that executes external processes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CapturedOutput {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
}

impl CapturedOutput {
    pub fn new(stdout: String, stderr: String) -> Self {
        Self { stdout, stderr }
    }

    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty() && self.stderr.is_empty()
    }
}

/// Exit status plus captured output of a finished command.
#[derive(Debug, Clone)]
pub struct CommandStatus {
    pub exit_code: i32,
    pub output: CapturedOutput,
}

impl CommandStatus {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Narrow seam over subprocess execution: (program, args, working dir,
/// extra child environment) to (exit code, captured output).
///
/// A spawn failure (program missing, cwd invalid) is an error; a nonzero
/// exit from the program itself is a normal `CommandStatus` and the
/// caller decides whether that is fatal.
pub trait ProcessRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
        env: &[(String, String)],
    ) -> Result<CommandStatus>;
}

/// Production runner backed by `std::process::Command`. Blocks until the
/// child exits.
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
        env: &[(String, String)],
    ) -> Result<CommandStatus> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        for (key, value) in env {
            cmd.env(key, value);
        }

        let output = cmd
            .output()
            .map_err(|e| Error::Io(std::io::Error::new(e.kind(), format!("Failed to run {}: {}", program, e))))?;

        Ok(CommandStatus {
            exit_code: output.status.code().unwrap_or(1),
            output: CapturedOutput::new(
                String::from_utf8_lossy(&output.stdout).trim().to_string(),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ),
        })
    }
}

/// Extract error text from captured output.
///
/// Prefers stderr, falls back to stdout if stderr is empty.
pub fn error_text(output: &CapturedOutput) -> String {
    if !output.stderr.trim().is_empty() {
        output.stderr.trim().to_string()
    } else {
        output.stdout.trim().to_string()
    }
}
