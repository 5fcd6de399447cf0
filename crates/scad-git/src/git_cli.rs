//! [`VcsClient`] backed by the `git` executable

use std::path::Path;
use std::process::Command;

use scad_exec::capture;
use scad_fs::{NormalizedPath, WorkspacePath};

use crate::client::{VcsClient, is_working_copy};
use crate::{Result, VcsError};

/// Program used when none is configured.
pub const DEFAULT_PROGRAM: &str = "git";

/// Remote queried and pulled from when none is configured.
pub const DEFAULT_REMOTE: &str = "origin";

/// Shells out to `git` for every operation.
///
/// Commands run with `GIT_TERMINAL_PROMPT=0`, so a remote that asks for
/// credentials fails the operation instead of waiting on stdin.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    remote: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
        }
    }

    /// Use a different executable (a name on `PATH` or a full path).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Use a different remote name.
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    fn command(&self, cwd: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(cwd).env("GIT_TERMINAL_PROMPT", "0");
        cmd
    }

    /// Run `git <args>` in `cwd`, returning trimmed stdout on success.
    fn run(&self, cwd: &Path, args: &[&str]) -> Result<String> {
        let mut cmd = self.command(cwd);
        cmd.args(args);
        let operation = scad_exec::describe(&cmd);

        let output = capture(cmd)?;
        if output.success() {
            Ok(output.stdout.trim().to_string())
        } else {
            Err(VcsError::CommandFailed {
                operation,
                path: cwd.to_path_buf(),
                code: output.code,
                message: output.diagnostic(),
            })
        }
    }

    /// Run `git <args>` against the repository rooted at `working_copy`.
    ///
    /// The git directory and work tree are pinned to `working_copy`, so a
    /// broken `.git` fails here instead of git falling back to an enclosing
    /// repository.
    fn run_in(&self, working_copy: &NormalizedPath, args: &[&str]) -> Result<String> {
        if !is_working_copy(working_copy) {
            return Err(VcsError::NotAWorkingCopy {
                path: working_copy.to_native(),
            });
        }
        let git_dir = format!("--git-dir={}", WorkspacePath::GitDir.as_str());
        let mut pinned = vec![git_dir.as_str(), "--work-tree=."];
        pinned.extend_from_slice(args);
        self.run(&working_copy.to_native(), &pinned)
    }

    fn non_empty(&self, value: String, operation: &str, path: &NormalizedPath) -> Result<String> {
        if value.is_empty() {
            Err(VcsError::EmptyOutput {
                operation: operation.to_string(),
                path: path.to_native(),
            })
        } else {
            Ok(value)
        }
    }
}

impl VcsClient for GitCli {
    fn name(&self) -> &str {
        &self.program
    }

    fn check_available(&self) -> Result<String> {
        Ok(scad_exec::check_available(&self.program)?)
    }

    fn query_revision(&self, working_copy: &NormalizedPath) -> Result<String> {
        let revision = self.run_in(working_copy, &["rev-parse", "HEAD"])?;
        self.non_empty(revision, "rev-parse HEAD", working_copy)
    }

    fn query_remote(&self, working_copy: &NormalizedPath) -> Result<String> {
        let url = self.run_in(working_copy, &["remote", "get-url", self.remote.as_str()])?;
        self.non_empty(url, "remote get-url", working_copy)
    }

    fn clone_repo(&self, url: &str, dest: &NormalizedPath) -> Result<()> {
        // Run in the parent and pass only the final component, so a relative
        // destination is not resolved twice
        let (cwd, target) = match (dest.parent(), dest.file_name()) {
            (Some(parent), Some(name)) => (parent.to_native(), name.to_string()),
            _ => (Path::new(".").to_path_buf(), dest.as_str().to_string()),
        };

        tracing::info!(url = %url, dest = %dest, "cloning library");
        self.run(
            &cwd,
            &["clone", "--origin", self.remote.as_str(), "--", url, target.as_str()],
        )?;
        Ok(())
    }

    fn pull(&self, working_copy: &NormalizedPath) -> Result<()> {
        tracing::info!(path = %working_copy, remote = %self.remote, "pulling library");
        self.run_in(
            working_copy,
            &["pull", "--no-rebase", "--no-edit", self.remote.as_str()],
        )?;
        Ok(())
    }
}
