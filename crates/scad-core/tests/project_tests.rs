//! Tests for project scaffolding

use pretty_assertions::assert_eq;
use rstest::rstest;
use scad_core::config::ProjectSection;
use scad_core::{CoreError, Workspace, WorkspaceConfig, create_project, list_projects};
use scad_test_utils::TestWorkspace;
use scad_test_utils::workspace::DEFAULT_TEMPLATE;

fn workspace(ws: &TestWorkspace) -> Workspace {
    Workspace::load(ws.root_path()).unwrap()
}

#[test]
fn test_create_project_substitutes_placeholders() {
    let ws = TestWorkspace::new();
    ws.write_template_default();

    let created = create_project(&workspace(&ws), "gearbox", "Planetary gearbox").unwrap();

    assert_eq!(created.main_file, ws.projects().join("gearbox").join("gearbox.scad"));
    let content = ws.read_file("projects/gearbox/gearbox.scad");
    assert!(content.starts_with("// gearbox\n// Planetary gearbox\n// Author: OpenSCAD User\n"));
    assert!(content.contains("include <BOSL2/std.scad>"));
    assert!(!content.contains("My Project"));
}

#[test]
fn test_create_project_uses_configured_author() {
    let ws = TestWorkspace::new();
    ws.write_template_default();
    let config = WorkspaceConfig {
        project: ProjectSection {
            author: "Ada Lovelace".into(),
        },
        ..Default::default()
    };
    let workspace = Workspace::with_config(ws.root_path(), config);

    create_project(&workspace, "bracket", "").unwrap();

    ws.assert_file_contains("projects/bracket/bracket.scad", "// Author: Ada Lovelace");
}

#[test]
fn test_create_project_reads_author_from_config_file() {
    let ws = TestWorkspace::new();
    ws.write_template_default();
    ws.write_config("[project]\nauthor = \"Grace\"\n");

    create_project(&workspace(&ws), "hinge", "").unwrap();

    ws.assert_file_contains("projects/hinge/hinge.scad", "// Author: Grace");
}

#[test]
fn test_create_existing_project_fails_and_keeps_content() {
    let ws = TestWorkspace::new();
    ws.write_template_default();
    ws.write_file("projects/gearbox/gearbox.scad", "// mine\n");

    let err = create_project(&workspace(&ws), "gearbox", "").unwrap_err();

    assert!(matches!(err, CoreError::ProjectExists { .. }));
    assert_eq!(ws.read_file("projects/gearbox/gearbox.scad"), "// mine\n");
}

#[test]
fn test_missing_template_creates_nothing() {
    let ws = TestWorkspace::new();

    let err = create_project(&workspace(&ws), "gearbox", "").unwrap_err();

    assert!(matches!(err, CoreError::TemplateMissing { .. }));
    ws.assert_file_not_exists("projects/gearbox");
    ws.assert_file_not_exists("projects");
}

#[cfg(unix)]
#[test]
fn test_failed_write_leaves_no_project_directory() {
    let ws = TestWorkspace::new();
    ws.write_template_default();
    // The directory name fits, the main file's temp name does not
    let name = "g".repeat(250);

    let first = create_project(&workspace(&ws), &name, "").unwrap_err();
    assert!(matches!(first, CoreError::Fs(_)), "{first:?}");
    assert!(!ws.root().join("projects").join(&name).exists());

    let retry = create_project(&workspace(&ws), &name, "").unwrap_err();
    assert!(!matches!(retry, CoreError::ProjectExists { .. }), "{retry:?}");
}

#[rstest]
#[case("")]
#[case("../escape")]
#[case("nested/name")]
#[case(".hidden")]
fn test_invalid_project_name_is_rejected(#[case] name: &str) {
    let ws = TestWorkspace::new();
    ws.write_template_default();

    let err = create_project(&workspace(&ws), name, "").unwrap_err();

    assert!(matches!(err, CoreError::Fs(scad_fs::Error::InvalidIdentifier { .. })));
    ws.assert_file_not_exists("projects");
}

#[test]
fn test_create_project_leaves_no_temp_files() {
    let ws = TestWorkspace::new();
    ws.write_template(DEFAULT_TEMPLATE);

    create_project(&workspace(&ws), "gearbox", "").unwrap();

    let entries: Vec<_> = std::fs::read_dir(ws.root().join("projects/gearbox"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["gearbox.scad"]);
}

#[test]
fn test_list_projects_sorted_with_counts() {
    let ws = TestWorkspace::new();
    ws.write_file("projects/widget/widget.scad", "");
    ws.write_file("projects/widget/parts.scad", "");
    ws.write_file("projects/widget/notes.md", "");
    ws.write_file("projects/anchor/anchor.scad", "");
    std::fs::create_dir_all(ws.root().join("projects/empty")).unwrap();
    ws.write_file("projects/stray.scad", "");

    let projects = list_projects(&workspace(&ws)).unwrap();

    let summary: Vec<_> = projects
        .iter()
        .map(|p| (p.name.as_str(), p.scad_files))
        .collect();
    assert_eq!(summary, vec![("anchor", 1), ("empty", 0), ("widget", 2)]);
}

#[test]
fn test_list_projects_without_directory_is_empty() {
    let ws = TestWorkspace::new();
    assert!(list_projects(&workspace(&ws)).unwrap().is_empty());
}
