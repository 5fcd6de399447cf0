//! Error types for scad-git

use std::path::PathBuf;

/// Result type for scad-git operations
pub type Result<T> = std::result::Result<T, VcsError>;

/// Errors that can occur in version-control operations
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    /// The client executable is missing or could not be started
    #[error(transparent)]
    Exec(#[from] scad_exec::ExecError),

    /// The client ran and exited with a non-zero status
    #[error("{operation} failed in {path}: {message}")]
    CommandFailed {
        operation: String,
        path: PathBuf,
        code: Option<i32>,
        message: String,
    },

    /// The client reported success but printed nothing useful
    #[error("{operation} returned no output in {path}")]
    EmptyOutput { operation: String, path: PathBuf },

    /// The directory has no version-control metadata
    #[error("Not a version-controlled copy: {path}")]
    NotAWorkingCopy { path: PathBuf },

    /// Remote unreachable or unknown (used by in-memory clients)
    #[error("Remote '{remote}' is unreachable: {message}")]
    RemoteUnreachable { remote: String, message: String },
}

impl VcsError {
    /// The text to show a user for this failure.
    ///
    /// For tool failures this is the tool's own output rather than the
    /// wrapped error chain.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::CommandFailed { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_is_tool_output_for_command_failures() {
        let err = VcsError::CommandFailed {
            operation: "git pull".into(),
            path: PathBuf::from("/libs/bosl2"),
            code: Some(1),
            message: "fatal: unable to access 'https://github.com/'".into(),
        };
        assert_eq!(err.diagnostic(), "fatal: unable to access 'https://github.com/'");
        assert!(err.to_string().contains("/libs/bosl2"));
    }

    #[test]
    fn test_diagnostic_falls_back_to_display() {
        let err = VcsError::NotAWorkingCopy {
            path: PathBuf::from("/libs/plain"),
        };
        assert_eq!(err.diagnostic(), "Not a version-controlled copy: /libs/plain");
    }
}
