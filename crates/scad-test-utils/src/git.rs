//! Git fixtures at two realism levels.
//!
//! Prefer [`fake_git_dir`] (or [`crate::FakeVcs`]) when a test only needs the
//! `.git` marker; use [`RemoteRepo`] when real clone/pull behavior matters.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Creates a `.git` directory **without** initialising a repository.
///
/// Realism level: **FAKE**: enough for presence detection, useless to git.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_git_dir(path: &Path) {
    fs::create_dir_all(path.join(".git/refs/heads"))
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to create .git: {e}"));
    fs::write(path.join(".git/HEAD"), "ref: refs/heads/main\n")
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to write HEAD: {e}"));
}

/// Run the `git` CLI in `dir` with a throwaway identity.
///
/// Returns trimmed stdout.
///
/// # Panics
/// Panics if git cannot be spawned or exits non-zero.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args([
            "-c",
            "user.email=test@example.com",
            "-c",
            "user.name=Test User",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|e| panic!("git: failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "git: `git {args:?}` failed in {}:\n{}",
            dir.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// HEAD commit of a working copy read through libgit2.
///
/// Independent of the git CLI, so it can check what `GitCli` reports.
///
/// # Panics
/// Panics if `path` is not a repository with at least one commit.
pub fn head_revision(path: &Path) -> String {
    let repo = git2::Repository::open(path)
        .unwrap_or_else(|e| panic!("head_revision: cannot open {}: {e}", path.display()));
    repo.head()
        .and_then(|head| head.peel_to_commit())
        .map(|commit| commit.id().to_string())
        .unwrap_or_else(|e| panic!("head_revision: no HEAD commit in {}: {e}", path.display()))
}

/// A remote library: a bare repository on `main` plus a seed clone that
/// pushes new commits into it.
///
/// Realism level: **REAL WITH HISTORY**: one initial commit.
pub struct RemoteRepo {
    _temp: TempDir,
    bare: PathBuf,
    seed: PathBuf,
}

impl RemoteRepo {
    /// Create a remote whose initial commit contains `<name>.scad`.
    pub fn new(name: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let bare_name = format!("{name}.git");
        let bare = temp.path().join(&bare_name);
        let seed = temp.path().join("seed");

        git(temp.path(), &["init", "--bare", &bare_name]);
        git(&bare, &["symbolic-ref", "HEAD", "refs/heads/main"]);

        git(temp.path(), &["init", "seed"]);
        git(&seed, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        fs::write(seed.join(format!("{name}.scad")), "// library entry point\n").unwrap();
        git(&seed, &["add", "."]);
        git(&seed, &["commit", "-m", "Initial commit"]);
        git(&seed, &["remote", "add", "origin", &bare.to_string_lossy()]);
        git(&seed, &["push", "origin", "main"]);

        Self {
            _temp: temp,
            bare,
            seed,
        }
    }

    /// Address to clone from.
    pub fn url(&self) -> String {
        self.bare.to_string_lossy().into_owned()
    }

    /// Path of the bare repository.
    pub fn bare_path(&self) -> &Path {
        &self.bare
    }

    /// Commit `content` to `file` and push it, returning the new revision.
    pub fn commit(&self, file: &str, content: &str) -> String {
        fs::write(self.seed.join(file), content).unwrap();
        git(&self.seed, &["add", "."]);
        git(&self.seed, &["commit", "-m", &format!("Update {file}")]);
        git(&self.seed, &["push", "origin", "main"]);
        self.head()
    }

    /// Current revision of `main` on the remote.
    pub fn head(&self) -> String {
        git(&self.bare, &["rev-parse", "refs/heads/main"])
    }

    /// Delete the bare repository so every clone or pull from it fails.
    pub fn make_unreachable(&self) {
        fs::remove_dir_all(&self.bare).unwrap();
    }
}
