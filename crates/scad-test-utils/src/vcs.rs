//! In-memory version-control client.
//!
//! [`FakeVcs`] keeps remotes and working copies in memory. Cloning creates
//! the destination directory with a fake `.git` marker so filesystem-based
//! presence detection sees it, but nothing is ever fetched.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;

use scad_exec::ExecError;
use scad_fs::NormalizedPath;
use scad_git::{Result, VcsClient, VcsError, is_working_copy};

use crate::git::fake_git_dir;

/// One recorded call on a [`FakeVcs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCall {
    QueryRevision(NormalizedPath),
    QueryRemote(NormalizedPath),
    Clone { url: String, dest: NormalizedPath },
    Pull(NormalizedPath),
}

#[derive(Debug, Clone)]
struct FakeRemote {
    head: String,
    reachable: bool,
}

#[derive(Debug, Clone)]
struct FakeCopy {
    url: Option<String>,
    revision: String,
    conflicted: bool,
}

#[derive(Debug, Default)]
struct FakeState {
    remotes: HashMap<String, FakeRemote>,
    copies: HashMap<NormalizedPath, FakeCopy>,
    calls: Vec<FakeCall>,
}

/// In-memory [`VcsClient`] for tests.
///
/// # Example
///
/// ```rust,no_run
/// use scad_test_utils::FakeVcs;
///
/// let vcs = FakeVcs::new()
///     .with_remote("https://example.com/lib-a.git", "r1")
///     .with_remote("https://example.com/lib-b.git", "r1");
/// vcs.advance_remote("https://example.com/lib-a.git", "r2");
/// ```
#[derive(Debug)]
pub struct FakeVcs {
    available: bool,
    state: RefCell<FakeState>,
}

impl Default for FakeVcs {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeVcs {
    /// An available client with no remotes.
    pub fn new() -> Self {
        Self {
            available: true,
            state: RefCell::new(FakeState::default()),
        }
    }

    /// A client whose availability probe fails, as if it were not installed.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Register a reachable remote at revision `head`.
    pub fn with_remote(self, url: &str, head: &str) -> Self {
        self.state.borrow_mut().remotes.insert(
            url.to_string(),
            FakeRemote {
                head: head.to_string(),
                reachable: true,
            },
        );
        self
    }

    /// Move a remote to a new revision.
    ///
    /// # Panics
    /// Panics if the remote was never registered.
    pub fn advance_remote(&self, url: &str, head: &str) {
        let mut state = self.state.borrow_mut();
        let remote = state
            .remotes
            .get_mut(url)
            .unwrap_or_else(|| panic!("advance_remote: unknown remote {url}"));
        remote.head = head.to_string();
    }

    /// Make every clone or pull from `url` fail as a transport error.
    pub fn make_unreachable(&self, url: &str) {
        if let Some(remote) = self.state.borrow_mut().remotes.get_mut(url) {
            remote.reachable = false;
        }
    }

    /// Create a working copy at `path` that tracks `url` at `revision`.
    ///
    /// The directory and a fake `.git` marker are created on disk.
    pub fn seed_copy(&self, path: &NormalizedPath, url: &str, revision: &str) {
        fs::create_dir_all(path.to_native()).unwrap();
        fake_git_dir(&path.to_native());
        self.state.borrow_mut().copies.insert(
            path.clone(),
            FakeCopy {
                url: Some(url.to_string()),
                revision: revision.to_string(),
                conflicted: false,
            },
        );
    }

    /// Create a working copy at `path` with no remote configured.
    pub fn seed_detached_copy(&self, path: &NormalizedPath, revision: &str) {
        self.seed_copy(path, "", revision);
        if let Some(copy) = self.state.borrow_mut().copies.get_mut(path) {
            copy.url = None;
        }
    }

    /// Make the next pulls into `path` fail with a merge conflict.
    pub fn make_conflicted(&self, path: &NormalizedPath) {
        if let Some(copy) = self.state.borrow_mut().copies.get_mut(path) {
            copy.conflicted = true;
        }
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<FakeCall> {
        self.state.borrow().calls.clone()
    }

    /// Number of clone calls made so far.
    pub fn clone_count(&self) -> usize {
        self.count(|c| matches!(c, FakeCall::Clone { .. }))
    }

    /// Number of pull calls made so far.
    pub fn pull_count(&self) -> usize {
        self.count(|c| matches!(c, FakeCall::Pull(_)))
    }

    /// Revision currently checked out at `path`, if it is a known copy.
    pub fn revision_at(&self, path: &NormalizedPath) -> Option<String> {
        self.state
            .borrow()
            .copies
            .get(path)
            .map(|c| c.revision.clone())
    }

    fn count(&self, pred: impl Fn(&FakeCall) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: FakeCall) {
        self.state.borrow_mut().calls.push(call);
    }

    fn failed(operation: &str, path: &NormalizedPath, message: &str) -> VcsError {
        VcsError::CommandFailed {
            operation: operation.to_string(),
            path: path.to_native(),
            code: Some(128),
            message: message.to_string(),
        }
    }

    fn reachable_head(&self, url: &str) -> Result<String> {
        match self.state.borrow().remotes.get(url) {
            Some(remote) if remote.reachable => Ok(remote.head.clone()),
            Some(_) => Err(VcsError::RemoteUnreachable {
                remote: url.to_string(),
                message: "Could not resolve host".to_string(),
            }),
            None => Err(VcsError::RemoteUnreachable {
                remote: url.to_string(),
                message: "repository not found".to_string(),
            }),
        }
    }
}

impl VcsClient for FakeVcs {
    fn name(&self) -> &str {
        "fake"
    }

    fn check_available(&self) -> Result<String> {
        if self.available {
            Ok("fake version 1.0".to_string())
        } else {
            Err(VcsError::Exec(ExecError::ToolNotFound {
                tool: "fake".to_string(),
                hint: String::new(),
            }))
        }
    }

    fn query_revision(&self, working_copy: &NormalizedPath) -> Result<String> {
        self.record(FakeCall::QueryRevision(working_copy.clone()));
        self.revision_at(working_copy)
            .ok_or_else(|| Self::failed("rev-parse", working_copy, "fatal: not a git repository"))
    }

    fn query_remote(&self, working_copy: &NormalizedPath) -> Result<String> {
        self.record(FakeCall::QueryRemote(working_copy.clone()));
        let url = self
            .state
            .borrow()
            .copies
            .get(working_copy)
            .and_then(|c| c.url.clone());
        url.ok_or_else(|| Self::failed("remote get-url", working_copy, "error: No such remote 'origin'"))
    }

    fn clone_repo(&self, url: &str, dest: &NormalizedPath) -> Result<()> {
        self.record(FakeCall::Clone {
            url: url.to_string(),
            dest: dest.clone(),
        });
        if dest.exists() {
            return Err(Self::failed(
                "clone",
                dest,
                "fatal: destination path already exists and is not an empty directory",
            ));
        }
        let head = self.reachable_head(url)?;
        self.seed_copy(dest, url, &head);
        Ok(())
    }

    fn pull(&self, working_copy: &NormalizedPath) -> Result<()> {
        self.record(FakeCall::Pull(working_copy.clone()));
        if !is_working_copy(working_copy) {
            return Err(VcsError::NotAWorkingCopy {
                path: working_copy.to_native(),
            });
        }
        let copy = self
            .state
            .borrow()
            .copies
            .get(working_copy)
            .cloned()
            .ok_or_else(|| Self::failed("pull", working_copy, "fatal: not a git repository"))?;
        let url = copy
            .url
            .ok_or_else(|| Self::failed("pull", working_copy, "fatal: 'origin' does not appear to be a git repository"))?;
        let head = self.reachable_head(&url)?;
        if copy.conflicted {
            return Err(Self::failed(
                "pull",
                working_copy,
                "CONFLICT (content): Merge conflict in main.scad\nAutomatic merge failed",
            ));
        }
        if let Some(copy) = self.state.borrow_mut().copies.get_mut(working_copy) {
            copy.revision = head;
        }
        Ok(())
    }
}
