//! Error types for external tool execution

/// Errors that can occur while running an external tool
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The tool could not be found or does not answer `--version`
    #[error("{tool} is not installed or not in PATH{hint}")]
    ToolNotFound {
        /// Program name as configured
        tool: String,
        /// Installation hint, already prefixed with a newline (may be empty)
        hint: String,
    },

    /// The process could not be spawned at all
    #[error("Failed to run {program}: {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited with a non-zero status
    #[error("{program} failed (exit code {code}): {stderr}")]
    CommandFailed {
        /// Program that failed
        program: String,
        /// Exit code, or -1 when terminated by a signal
        code: i32,
        /// Captured diagnostic output
        stderr: String,
    },
}

/// Result type alias for execution operations
pub type Result<T> = std::result::Result<T, ExecError>;
