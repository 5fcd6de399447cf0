//! Project scaffolding
//!
//! A project is `<projects>/<name>/<name>.scad`, created from
//! `<templates>/project_template.scad` with a few literal substitutions.

use std::fs;

use scad_fs::{NormalizedPath, io, validate_path_identifier};
use serde::Serialize;

use crate::config::Workspace;
use crate::{CoreError, Result};

/// Template placeholders and what replaces them
const NAME_PLACEHOLDER: &str = "My Project";
const DESCRIPTION_PLACEHOLDER: &str = "Description of your project";
const AUTHOR_PLACEHOLDER: &str = "Your Name";

/// A project that was just created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedProject {
    pub name: String,
    pub directory: NormalizedPath,
    pub main_file: NormalizedPath,
}

/// An existing project directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub path: NormalizedPath,
    pub scad_files: usize,
}

/// Fill in the template placeholders.
pub fn render_template(template: &str, name: &str, description: &str, author: &str) -> String {
    template
        .replace(NAME_PLACEHOLDER, name)
        .replace(DESCRIPTION_PLACEHOLDER, description)
        .replace(AUTHOR_PLACEHOLDER, author)
}

/// Create a new project from the workspace template.
///
/// The name and template are checked before any directory is created, and
/// the main file is written atomically.
pub fn create_project(workspace: &Workspace, name: &str, description: &str) -> Result<CreatedProject> {
    validate_path_identifier(name)?;

    let directory = workspace.projects_root().join(name);
    if directory.exists() {
        return Err(CoreError::ProjectExists {
            name: name.to_string(),
            path: directory.to_native(),
        });
    }

    let template_path = workspace.project_template();
    if !template_path.is_file() {
        return Err(CoreError::TemplateMissing {
            path: template_path.to_native(),
        });
    }
    let template = io::read_text(&template_path)?;
    let content = render_template(
        &template,
        name,
        description,
        &workspace.config().project.author,
    );

    let main_file = directory.join(format!("{name}.scad"));
    io::ensure_dir(&directory)?;
    if let Err(e) = io::write_text(&main_file, &content) {
        // A leftover empty directory would make every retry fail as existing
        if let Err(cleanup) = fs::remove_dir_all(directory.to_native()) {
            tracing::warn!(path = %directory, error = %cleanup, "failed to remove partial project");
        }
        return Err(e.into());
    }

    tracing::info!(project = %name, path = %main_file, "created project");
    Ok(CreatedProject {
        name: name.to_string(),
        directory,
        main_file,
    })
}

/// Projects in the workspace, sorted by name.
///
/// A missing projects directory means no projects.
pub fn list_projects(workspace: &Workspace) -> Result<Vec<ProjectSummary>> {
    let root = workspace.projects_root();
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut projects = Vec::new();
    for entry in fs::read_dir(root.to_native())? {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let scad_files = fs::read_dir(entry.path())?
            .filter_map(|e| e.ok())
            .filter(|e| {
                let path = e.path();
                path.is_file() && path.extension().is_some_and(|ext| ext == "scad")
            })
            .count();
        projects.push(ProjectSummary {
            path: root.join(&name),
            name,
            scad_files,
        });
    }
    projects.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_template_replaces_every_placeholder() {
        let template = "// My Project\n// Description of your project\n// Author: Your Name\n// My Project v1\n";
        let rendered = render_template(template, "gearbox", "Planetary gearbox", "Ada");
        assert_eq!(
            rendered,
            "// gearbox\n// Planetary gearbox\n// Author: Ada\n// gearbox v1\n"
        );
    }

    #[test]
    fn test_render_template_without_placeholders_is_unchanged() {
        assert_eq!(render_template("cube(1);\n", "x", "y", "z"), "cube(1);\n");
    }
}
