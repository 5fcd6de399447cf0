//! Workspace configuration
//!
//! An OpenSCAD workspace is a directory tree with `libraries/`, `projects/`,
//! `templates/` and `renders/` folders. An optional `scadkit.toml` at the
//! root marks it and overrides the defaults:
//!
//! ```toml
//! [paths]
//! libraries = "libraries"
//! projects = "projects"
//! templates = "templates"
//! renders = "renders"
//!
//! [git]
//! program = "git"
//! remote = "origin"
//!
//! [render]
//! program = "openscad"
//! image_size = [800, 600]
//! poll_interval_ms = 1000
//!
//! [project]
//! author = "OpenSCAD User"
//! ```
//!
//! Every key is optional. Relative paths resolve against the workspace root.

use std::path::Path;
use std::time::Duration;

use scad_fs::{ConfigStore, NormalizedPath, WorkspacePath};
use scad_git::GitCli;
use serde::{Deserialize, Serialize};

use crate::{CoreError, Result};

/// Directory layout, relative to the workspace root unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    pub libraries: String,
    pub projects: String,
    pub templates: String,
    pub renders: String,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            libraries: WorkspacePath::Libraries.as_str().to_string(),
            projects: WorkspacePath::Projects.as_str().to_string(),
            templates: WorkspacePath::Templates.as_str().to_string(),
            renders: WorkspacePath::Renders.as_str().to_string(),
        }
    }
}

/// Version-control client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitSection {
    /// Executable name or path
    pub program: String,
    /// Remote that status queries and pulls use
    pub remote: String,
}

impl Default for GitSection {
    fn default() -> Self {
        Self {
            program: scad_git::DEFAULT_PROGRAM.to_string(),
            remote: scad_git::DEFAULT_REMOTE.to_string(),
        }
    }
}

/// Renderer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSection {
    pub program: String,
    /// PNG preview size as `[width, height]`
    pub image_size: [u32; 2],
    /// How often watch mode checks the source file
    pub poll_interval_ms: u64,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            program: "openscad".to_string(),
            image_size: [800, 600],
            poll_interval_ms: 1000,
        }
    }
}

impl RenderSection {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Project scaffolding settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    /// Substituted for `Your Name` in the template
    pub author: String,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            author: "OpenSCAD User".to_string(),
        }
    }
}

/// Parsed `scadkit.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub paths: PathsSection,
    pub git: GitSection,
    pub render: RenderSection,
    pub project: ProjectSection,
}

impl WorkspaceConfig {
    /// Reject values that parse but cannot work.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| {
            Err(CoreError::InvalidConfig {
                message: message.to_string(),
            })
        };

        if self.git.program.trim().is_empty() {
            return invalid("git.program must not be empty");
        }
        if self.git.remote.trim().is_empty() {
            return invalid("git.remote must not be empty");
        }
        if self.render.program.trim().is_empty() {
            return invalid("render.program must not be empty");
        }
        if self.render.image_size.contains(&0) {
            return invalid("render.image_size must be two positive numbers");
        }
        if self.render.poll_interval_ms == 0 {
            return invalid("render.poll_interval_ms must be positive");
        }
        let paths = &self.paths;
        if [&paths.libraries, &paths.projects, &paths.templates, &paths.renders]
            .iter()
            .any(|p| p.trim().is_empty())
        {
            return invalid("paths.* entries must not be empty");
        }
        Ok(())
    }
}

/// A workspace root together with its configuration.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: NormalizedPath,
    config: WorkspaceConfig,
}

impl Workspace {
    /// Workspace at `root` with default configuration.
    pub fn new(root: NormalizedPath) -> Self {
        Self::with_config(root, WorkspaceConfig::default())
    }

    pub fn with_config(root: NormalizedPath, config: WorkspaceConfig) -> Self {
        Self { root, config }
    }

    /// Load the workspace at `root`, reading `scadkit.toml` when present.
    pub fn load(root: NormalizedPath) -> Result<Self> {
        let config_path = root.join(WorkspacePath::ConfigFile);
        let config: WorkspaceConfig = ConfigStore::new().load_or_default(&config_path)?;
        config.validate()?;
        tracing::debug!(root = %root, "loaded workspace");
        Ok(Self { root, config })
    }

    /// Find the workspace root for `start`: the nearest ancestor (including
    /// `start` itself) that holds `scadkit.toml`, or `start` when none does.
    pub fn discover(start: &Path) -> NormalizedPath {
        start
            .ancestors()
            .find(|dir| dir.join(WorkspacePath::ConfigFile).is_file())
            .map(NormalizedPath::new)
            .unwrap_or_else(|| NormalizedPath::new(start))
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn libraries_root(&self) -> NormalizedPath {
        self.root.join(&self.config.paths.libraries)
    }

    pub fn projects_root(&self) -> NormalizedPath {
        self.root.join(&self.config.paths.projects)
    }

    pub fn templates_root(&self) -> NormalizedPath {
        self.root.join(&self.config.paths.templates)
    }

    pub fn renders_root(&self) -> NormalizedPath {
        self.root.join(&self.config.paths.renders)
    }

    pub fn project_template(&self) -> NormalizedPath {
        self.templates_root().join(WorkspacePath::ProjectTemplate)
    }

    /// A `git` client configured for this workspace.
    pub fn git_client(&self) -> GitCli {
        GitCli::new()
            .with_program(&self.config.git.program)
            .with_remote(&self.config.git.remote)
    }
}
