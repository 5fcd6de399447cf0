//! Shared test utilities for the scadkit workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: real git remotes backed by local bare repositories
//! - [`vcs`]: [`FakeVcs`], an in-memory [`scad_git::VcsClient`]
//! - [`workspace`]: [`TestWorkspace`] builder for a temporary OpenSCAD workspace

pub mod git;
pub mod vcs;
pub mod workspace;

pub use git::RemoteRepo;
pub use vcs::{FakeCall, FakeVcs};
pub use workspace::TestWorkspace;
