//! Core layer for scadkit
//!
//! This crate coordinates the Layer 0 crates into the operations the CLI
//! exposes:
//!
//! - **Catalog**: the ordered set of known OpenSCAD libraries
//! - **Synchronizer**: status and clone/pull reconciliation of library
//!   working copies through a [`scad_git::VcsClient`]
//! - **Workspace**: `scadkit.toml` loading and directory layout
//! - **Projects**: template-based scaffolding
//! - **Rendering**: STL/PNG export through a [`Renderer`], plus a
//!   modification-time watcher for watch mode
//!
//! # Architecture
//!
//! ```text
//!                  scad-cli
//!                     |
//!                 scad-core
//!                     |
//!      +--------------+--------------+
//!      |              |              |
//!  scad-exec       scad-fs       scad-git
//! ```
//!
//! # Example
//!
//! ```ignore
//! use scad_core::{Catalog, Synchronizer, Workspace};
//!
//! let workspace = Workspace::load(root)?;
//! let sync = Synchronizer::new(
//!     Catalog::builtin(),
//!     workspace.libraries_root(),
//!     workspace.git_client(),
//! );
//! sync.check_available()?;
//! let report = sync.reconcile_all();
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod project;
pub mod render;
pub mod sync;
pub mod watch;

pub use catalog::{Catalog, LibraryEntry};
pub use config::{Workspace, WorkspaceConfig};
pub use error::{CoreError, Result};
pub use project::{CreatedProject, ProjectSummary, create_project, list_projects};
pub use render::{
    ArtifactKind, ArtifactResult, OpenScad, RenderReport, RenderRequest, Renderer, render_file,
};
pub use sync::{
    BatchReport, LibraryStatus, LocalLibraryState, Presence, ReconcileAction, ReconcileOutcome,
    StatusReport, SyncEvent, Synchronizer, UNKNOWN,
};
pub use watch::ChangeWatcher;
