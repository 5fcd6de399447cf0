//! The version-control capability trait

use std::path::Path;

use scad_fs::{NormalizedPath, WorkspacePath};

use crate::Result;

/// Operations the library synchronizer needs from a version-control client.
///
/// Implementations report every failure as an `Err`; deciding whether a
/// failure is fatal is up to the caller. The synchronizer treats all of them
/// as per-library failures.
pub trait VcsClient {
    /// Short name of the client for messages (e.g. "git").
    fn name(&self) -> &str;

    /// Check that the client can run at all.
    ///
    /// Returns a version string. Called once before any batch work.
    fn check_available(&self) -> Result<String>;

    /// Identifier of the commit checked out in `working_copy`.
    fn query_revision(&self, working_copy: &NormalizedPath) -> Result<String>;

    /// Remote address configured in `working_copy`.
    fn query_remote(&self, working_copy: &NormalizedPath) -> Result<String>;

    /// Create a full copy of `url` at `dest`.
    ///
    /// `dest` must not exist yet; its parent must.
    fn clone_repo(&self, url: &str, dest: &NormalizedPath) -> Result<()>;

    /// Merge the latest changes from the configured remote into `working_copy`.
    ///
    /// Local modifications survive when the merge succeeds. A conflicting
    /// merge is an error.
    fn pull(&self, working_copy: &NormalizedPath) -> Result<()>;
}

/// Whether `dir` carries version-control metadata.
///
/// `.git` may be a directory or, for worktrees and submodules, a file.
pub fn is_working_copy(dir: impl AsRef<Path>) -> bool {
    dir.as_ref().join(WorkspacePath::GitDir.as_str()).exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_working_copy_with_git_dir() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".git")).unwrap();
        assert!(is_working_copy(&NormalizedPath::new(temp.path())));
    }

    #[test]
    fn test_is_working_copy_with_git_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".git"), "gitdir: ../.git/modules/lib\n").unwrap();
        assert!(is_working_copy(&NormalizedPath::new(temp.path())));
    }

    #[test]
    fn test_plain_directory_is_not_working_copy() {
        let temp = TempDir::new().unwrap();
        assert!(!is_working_copy(&NormalizedPath::new(temp.path())));
    }
}
