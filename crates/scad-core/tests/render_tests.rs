//! Tests for preview rendering with a scripted renderer

use std::cell::RefCell;

use pretty_assertions::assert_eq;
use scad_core::{ArtifactKind, CoreError, RenderRequest, Renderer, render_file};
use scad_exec::ExecError;
use scad_fs::NormalizedPath;
use scad_test_utils::TestWorkspace;

/// Records every export and fails the extensions it is told to fail.
#[derive(Default)]
struct ScriptedRenderer {
    fail_extensions: Vec<&'static str>,
    exports: RefCell<Vec<(String, Vec<String>)>>,
}

impl Renderer for ScriptedRenderer {
    fn name(&self) -> &str {
        "scripted"
    }

    fn check_available(&self) -> scad_core::Result<String> {
        Ok("scripted 1.0".into())
    }

    fn export(
        &self,
        source: &NormalizedPath,
        output: &NormalizedPath,
        extra_args: &[String],
    ) -> scad_exec::Result<()> {
        assert!(source.is_file(), "source should be absolute and present: {source}");
        self.exports
            .borrow_mut()
            .push((output.file_name().unwrap_or("").to_string(), extra_args.to_vec()));

        let extension = output.extension().unwrap_or("");
        if self.fail_extensions.contains(&extension) {
            return Err(ExecError::CommandFailed {
                program: "scripted".into(),
                code: 1,
                stderr: format!("ERROR: cannot export {extension}"),
            });
        }
        std::fs::write(output.to_native(), "rendered").unwrap();
        Ok(())
    }
}

fn request(ws: &TestWorkspace) -> RenderRequest {
    ws.write_file("projects/gear/gear.scad", "cube(10);\n");
    RenderRequest::new(
        ws.root_path().join("projects/gear/gear.scad"),
        ws.root_path().join("renders"),
    )
}

#[test]
fn test_renders_stl_then_png() {
    let ws = TestWorkspace::new();
    let renderer = ScriptedRenderer::default();

    let report = render_file(&renderer, &request(&ws)).unwrap();

    assert!(report.all_succeeded());
    let exports = renderer.exports.borrow();
    assert_eq!(
        *exports,
        vec![
            ("gear.stl".to_string(), vec![]),
            (
                "gear.png".to_string(),
                vec!["--render".to_string(), "--imgsize=800,600".to_string()]
            ),
        ]
    );
    ws.assert_file_exists("renders/gear.stl");
    ws.assert_file_exists("renders/gear.png");
}

#[test]
fn test_artifact_failures_are_independent() {
    let ws = TestWorkspace::new();
    let renderer = ScriptedRenderer {
        fail_extensions: vec!["stl"],
        ..Default::default()
    };

    let report = render_file(&renderer, &request(&ws)).unwrap();

    assert!(!report.all_succeeded());
    let stl = report.artifact(ArtifactKind::Stl).unwrap();
    assert_eq!(stl.result, Err("ERROR: cannot export stl".to_string()));
    assert!(report.artifact(ArtifactKind::Png).unwrap().success());
    ws.assert_file_exists("renders/gear.png");
}

#[test]
fn test_disabled_artifact_is_not_exported() {
    let ws = TestWorkspace::new();
    let renderer = ScriptedRenderer::default();
    let mut request = request(&ws);
    request.png = false;

    let report = render_file(&renderer, &request).unwrap();

    assert_eq!(report.artifacts.len(), 1);
    assert_eq!(report.artifacts[0].kind, ArtifactKind::Stl);
    ws.assert_file_not_exists("renders/gear.png");
}

#[test]
fn test_custom_image_size() {
    let ws = TestWorkspace::new();
    let renderer = ScriptedRenderer::default();
    let mut request = request(&ws);
    request.stl = false;
    request.image_size = [1920, 1080];

    render_file(&renderer, &request).unwrap();

    assert_eq!(renderer.exports.borrow()[0].1[1], "--imgsize=1920,1080");
}

#[test]
fn test_missing_source_is_error_and_creates_nothing() {
    let ws = TestWorkspace::new();
    let renderer = ScriptedRenderer::default();
    let request = RenderRequest::new(
        ws.root_path().join("nope.scad"),
        ws.root_path().join("renders"),
    );

    let err = render_file(&renderer, &request).unwrap_err();

    assert!(matches!(err, CoreError::SourceMissing { .. }));
    assert!(renderer.exports.borrow().is_empty());
    ws.assert_file_not_exists("renders");
}
