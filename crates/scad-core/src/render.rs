//! Preview rendering through an external renderer
//!
//! Each requested artifact is exported by its own renderer invocation and
//! reported on its own, so a failing PNG preview does not hide a good STL.

use std::fmt;
use std::process::Command;

use scad_exec::{ExecError, capture};
use scad_fs::{NormalizedPath, io};
use serde::Serialize;

use crate::{CoreError, Result};

/// Output formats a render can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Stl,
    Png,
}

impl ArtifactKind {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stl => "STL",
            Self::Png => "PNG preview",
        })
    }
}

/// An external program that turns a source file into an output file.
pub trait Renderer {
    fn name(&self) -> &str;

    /// Check that the renderer runs. Returns its version string.
    fn check_available(&self) -> Result<String>;

    /// Export `source` to `output`.
    ///
    /// The output format follows from the extension of `output`; `extra_args`
    /// go between the output and the source.
    fn export(
        &self,
        source: &NormalizedPath,
        output: &NormalizedPath,
        extra_args: &[String],
    ) -> scad_exec::Result<()>;
}

/// [`Renderer`] backed by the `openscad` executable
#[derive(Debug, Clone)]
pub struct OpenScad {
    program: String,
}

impl Default for OpenScad {
    fn default() -> Self {
        Self::new("openscad")
    }
}

impl OpenScad {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Renderer for OpenScad {
    fn name(&self) -> &str {
        &self.program
    }

    fn check_available(&self) -> Result<String> {
        Ok(scad_exec::check_available(&self.program)?)
    }

    fn export(
        &self,
        source: &NormalizedPath,
        output: &NormalizedPath,
        extra_args: &[String],
    ) -> scad_exec::Result<()> {
        let mut cmd = Command::new(&self.program);
        // Relative includes in the source resolve against its directory
        if let Some(dir) = source.parent() {
            cmd.current_dir(dir.to_native());
        }
        cmd.arg("-o")
            .arg(output.to_native())
            .args(extra_args)
            .arg(source.to_native());
        capture(cmd)?.into_result().map(|_| ())
    }
}

/// What to render and where
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub source: NormalizedPath,
    pub output_dir: NormalizedPath,
    pub stl: bool,
    pub png: bool,
    /// PNG size as `[width, height]`
    pub image_size: [u32; 2],
}

impl RenderRequest {
    /// Both artifacts at the default 800x600 preview size.
    pub fn new(source: NormalizedPath, output_dir: NormalizedPath) -> Self {
        Self {
            source,
            output_dir,
            stl: true,
            png: true,
            image_size: [800, 600],
        }
    }

    /// Output path for `kind`: `<output_dir>/<source stem>.<ext>`.
    pub fn output_path(&self, kind: ArtifactKind) -> NormalizedPath {
        let stem = self.source.file_stem().unwrap_or("output");
        self.output_dir.join(format!("{stem}.{}", kind.extension()))
    }

    fn kinds(&self) -> Vec<ArtifactKind> {
        let mut kinds = Vec::new();
        if self.stl {
            kinds.push(ArtifactKind::Stl);
        }
        if self.png {
            kinds.push(ArtifactKind::Png);
        }
        kinds
    }

    fn extra_args(&self, kind: ArtifactKind) -> Vec<String> {
        match kind {
            ArtifactKind::Stl => Vec::new(),
            ArtifactKind::Png => {
                let [width, height] = self.image_size;
                vec!["--render".to_string(), format!("--imgsize={width},{height}")]
            }
        }
    }
}

/// Result of exporting one artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactResult {
    pub kind: ArtifactKind,
    pub output: NormalizedPath,
    /// Renderer diagnostic on failure
    pub result: std::result::Result<(), String>,
}

impl ArtifactResult {
    pub fn success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Results for every requested artifact, in STL, PNG order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    pub source: NormalizedPath,
    pub artifacts: Vec<ArtifactResult>,
}

impl RenderReport {
    pub fn all_succeeded(&self) -> bool {
        self.artifacts.iter().all(ArtifactResult::success)
    }

    pub fn artifact(&self, kind: ArtifactKind) -> Option<&ArtifactResult> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }
}

/// Render `request.source` with `renderer`.
///
/// A missing source or an uncreatable output directory is an `Err`; renderer
/// failures are recorded per artifact.
pub fn render_file(renderer: &dyn Renderer, request: &RenderRequest) -> Result<RenderReport> {
    if !request.source.is_file() {
        return Err(CoreError::SourceMissing {
            path: request.source.to_native(),
        });
    }
    io::ensure_dir(&request.output_dir)?;

    // The renderer runs in the source's directory, so hand it absolute paths
    let source = NormalizedPath::canonical(request.source.to_native());
    let resolved = RenderRequest {
        source: source.clone(),
        output_dir: NormalizedPath::canonical(request.output_dir.to_native()),
        ..request.clone()
    };

    let mut artifacts = Vec::new();
    for kind in resolved.kinds() {
        let output = resolved.output_path(kind);
        tracing::info!(source = %source, output = %output, "rendering {kind}");
        let result = renderer
            .export(&source, &output, &resolved.extra_args(kind))
            .map_err(|e| diagnostic(&e));
        if let Err(message) = &result {
            tracing::debug!(output = %output, error = %message, "render failed");
        }
        artifacts.push(ArtifactResult {
            kind,
            output,
            result,
        });
    }

    Ok(RenderReport { source, artifacts })
}

fn diagnostic(err: &ExecError) -> String {
    match err {
        ExecError::CommandFailed { stderr, .. } => stderr.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_output_paths_use_source_stem() {
        let request = RenderRequest::new(
            NormalizedPath::new("/ws/projects/gear/gear.scad"),
            NormalizedPath::new("/ws/renders"),
        );
        assert_eq!(request.output_path(ArtifactKind::Stl).as_str(), "/ws/renders/gear.stl");
        assert_eq!(request.output_path(ArtifactKind::Png).as_str(), "/ws/renders/gear.png");
    }

    #[test]
    fn test_png_args_carry_image_size() {
        let mut request = RenderRequest::new("a.scad".into(), "out".into());
        request.image_size = [1024, 768];
        assert_eq!(
            request.extra_args(ArtifactKind::Png),
            vec!["--render".to_string(), "--imgsize=1024,768".to_string()]
        );
        assert!(request.extra_args(ArtifactKind::Stl).is_empty());
    }

    #[test]
    fn test_disabled_artifacts_are_not_requested() {
        let mut request = RenderRequest::new("a.scad".into(), "out".into());
        request.stl = false;
        assert_eq!(request.kinds(), vec![ArtifactKind::Png]);
    }

    #[test]
    fn test_missing_renderer_is_tool_missing() {
        let err = OpenScad::new("scadkit-no-such-openscad")
            .check_available()
            .unwrap_err();
        assert!(err.is_tool_missing());
    }
}
