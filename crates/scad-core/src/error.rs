//! Error types for scad-core

use std::path::PathBuf;

/// Result type for scad-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur in scad-core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Name not present in the catalog (matching is exact and case-sensitive)
    #[error("Unknown library: '{name}'")]
    UnknownLibrary { name: String },

    /// Two catalog entries share a name
    #[error("Duplicate library in catalog: '{name}'")]
    DuplicateLibrary { name: String },

    /// Workspace configuration is present but unusable
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Project '{name}' already exists at {path}")]
    ProjectExists { name: String, path: PathBuf },

    #[error("Template file not found: {path}")]
    TemplateMissing { path: PathBuf },

    #[error("Source file not found: {path}")]
    SourceMissing { path: PathBuf },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from scad-fs
    #[error(transparent)]
    Fs(#[from] scad_fs::Error),

    /// Version-control error from scad-git
    #[error(transparent)]
    Vcs(#[from] scad_git::VcsError),

    /// Subprocess error from scad-exec
    #[error(transparent)]
    Exec(#[from] scad_exec::ExecError),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Whether this error means a required external tool cannot run.
    pub fn is_tool_missing(&self) -> bool {
        matches!(
            self,
            Self::Exec(scad_exec::ExecError::ToolNotFound { .. })
                | Self::Vcs(scad_git::VcsError::Exec(scad_exec::ExecError::ToolNotFound { .. }))
        )
    }
}
