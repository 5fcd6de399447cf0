//! Well-known names inside an OpenSCAD workspace.

use std::path::Path;

/// Default locations relative to the workspace root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspacePath {
    /// The `scadkit.toml` file that marks a workspace root
    ConfigFile,
    /// The `libraries` directory holding one working copy per library
    Libraries,
    /// The `projects` directory holding one folder per project
    Projects,
    /// The `templates` directory
    Templates,
    /// The `project_template.scad` file inside the templates directory
    ProjectTemplate,
    /// The `renders` directory receiving STL/PNG output
    Renders,
    /// The `.git` metadata entry of a working copy
    GitDir,
}

impl WorkspacePath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigFile => "scadkit.toml",
            Self::Libraries => "libraries",
            Self::Projects => "projects",
            Self::Templates => "templates",
            Self::ProjectTemplate => "project_template.scad",
            Self::Renders => "renders",
            Self::GitDir => ".git",
        }
    }
}

impl AsRef<Path> for WorkspacePath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for WorkspacePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for WorkspacePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
