//! [`TestWorkspace`] builder for scadkit test scenarios.

use std::fs;
use std::path::Path;

use scad_fs::NormalizedPath;
use tempfile::TempDir;

/// Template text used by [`TestWorkspace::write_template`] when the test
/// does not care about the content.
pub const DEFAULT_TEMPLATE: &str = "\
// My Project
// Description of your project
// Author: Your Name

include <BOSL2/std.scad>

cube(10);
";

/// A temporary workspace root with helper methods for test setup and
/// assertion.
///
/// No directories are created up front; tests decide which of
/// `libraries/`, `projects/` and `templates/` exist.
///
/// # Example
///
/// ```rust,no_run
/// use scad_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write_template_default();
/// ws.plain_library("handmade");
/// ws.assert_file_exists("libraries/handmade");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Root as a [`NormalizedPath`].
    pub fn root_path(&self) -> NormalizedPath {
        NormalizedPath::new(self.root())
    }

    /// Default libraries root (`<root>/libraries`), not necessarily existing.
    pub fn libraries(&self) -> NormalizedPath {
        self.root_path().join("libraries")
    }

    /// Default projects root (`<root>/projects`), not necessarily existing.
    pub fn projects(&self) -> NormalizedPath {
        self.root_path().join("projects")
    }

    /// Write `scadkit.toml` at the root with the given content.
    pub fn write_config(&self, content: &str) {
        fs::write(self.root().join("scadkit.toml"), content).unwrap();
    }

    /// Write `templates/project_template.scad`.
    pub fn write_template(&self, content: &str) {
        let dir = self.root().join("templates");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("project_template.scad"), content).unwrap();
    }

    /// Write the template with [`DEFAULT_TEMPLATE`].
    pub fn write_template_default(&self) {
        self.write_template(DEFAULT_TEMPLATE);
    }

    /// Create `libraries/<name>` as a plain directory with one file and no
    /// `.git` marker.
    pub fn plain_library(&self, name: &str) -> NormalizedPath {
        let dir = self.libraries().join(name);
        fs::create_dir_all(dir.to_native()).unwrap();
        fs::write(dir.join("notes.txt").to_native(), "hand-copied\n").unwrap();
        dir
    }

    /// Write `content` to `path` relative to the root, creating parents.
    pub fn write_file(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    /// Read `path` relative to the root.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_file(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `path` (relative to the root) exists.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` contains `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read_file(path);
        assert!(
            file_content.contains(content),
            "File {path} does not contain expected content.\nExpected: {content}\nActual: {file_content}"
        );
    }
}
