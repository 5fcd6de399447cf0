//! Version-control capability for scadkit
//!
//! Library synchronization only needs four things from a version-control
//! system: the checked-out revision, the configured remote address, a fresh
//! clone, and a merge-style update. [`VcsClient`] names exactly those, and
//! [`GitCli`] provides them by shelling out to the `git` executable.

pub mod client;
pub mod error;
pub mod git_cli;

pub use client::{VcsClient, is_working_copy};
pub use error::{Result, VcsError};
pub use git_cli::{DEFAULT_PROGRAM, DEFAULT_REMOTE, GitCli};
