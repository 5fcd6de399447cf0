//! Captured subprocess execution
//!
//! Tools are always run to completion with stdout and stderr captured.
//! There is no timeout: a hung tool blocks the caller until it exits or the
//! process is interrupted.

use std::process::Command;

use crate::error::{ExecError, Result};

/// Exit status and output streams of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Program that was run
    pub program: String,
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    /// Captured stdout (lossy UTF-8)
    pub stdout: String,
    /// Captured stderr (lossy UTF-8)
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Human-readable diagnostic for a failed run.
    ///
    /// Prefers stderr, falls back to stdout, and finally to the exit status
    /// when the tool printed nothing.
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        match self.code {
            Some(code) => format!("{} exited with status {}", self.program, code),
            None => format!("{} was terminated by a signal", self.program),
        }
    }

    /// Convert into trimmed stdout on success, or [`ExecError::CommandFailed`].
    pub fn into_result(self) -> Result<String> {
        if self.success() {
            Ok(self.stdout.trim().to_string())
        } else {
            let stderr = self.diagnostic();
            Err(ExecError::CommandFailed {
                program: self.program,
                code: self.code.unwrap_or(-1),
                stderr,
            })
        }
    }
}

/// Render a command line for logs and messages.
pub fn describe(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

/// Run `cmd` to completion and capture its output.
///
/// A non-zero exit is **not** an error here; inspect
/// [`CommandOutput::success`]. Only a failure to spawn the process returns
/// [`ExecError::Spawn`].
pub fn capture(mut cmd: Command) -> Result<CommandOutput> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!(command = %describe(&cmd), "running external tool");

    let output = cmd.output().map_err(|source| ExecError::Spawn {
        program: program.clone(),
        source,
    })?;

    let result = CommandOutput {
        program,
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    if !result.success() {
        tracing::debug!(
            program = %result.program,
            code = ?result.code,
            "external tool exited unsuccessfully"
        );
    }

    Ok(result)
}
