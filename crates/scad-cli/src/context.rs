//! Workspace detection
//!
//! Commands work from anywhere inside a workspace: the root is the nearest
//! ancestor holding `scadkit.toml`, unless `--root` names one explicitly.

use std::path::Path;

use scad_core::Workspace;
use scad_fs::NormalizedPath;

use crate::error::Result;

/// Resolve and load the workspace for this invocation.
pub fn load_workspace(explicit_root: Option<&Path>) -> Result<Workspace> {
    let cwd = std::env::current_dir()?;
    let root = match explicit_root {
        Some(root) => NormalizedPath::canonical(cwd.join(root)),
        None => NormalizedPath::canonical(Workspace::discover(&cwd).to_native()),
    };
    tracing::debug!(root = %root, "workspace root");
    Ok(Workspace::load(root)?)
}
