//! Tool availability probes
//!
//! Commands that depend on an external tool check for it before doing any
//! work, so a missing `git` or `openscad` fails fast instead of halfway
//! through a batch.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::command::capture;
use crate::error::{ExecError, Result};

/// Check that `program` runs and answers `--version`.
///
/// Returns the first line of the version output (e.g. `git version 2.43.0`).
pub fn check_available(program: &str) -> Result<String> {
    let mut cmd = Command::new(program);
    cmd.arg("--version");

    let not_found = || ExecError::ToolNotFound {
        tool: program.to_string(),
        hint: install_hint(program)
            .map(|h| format!("\n  Install: {h}"))
            .unwrap_or_default(),
    };

    let output = capture(cmd).map_err(|_| not_found())?;
    if !output.success() {
        return Err(not_found());
    }

    // OpenSCAD prints its version on stderr
    let text = if output.stdout.trim().is_empty() {
        &output.stderr
    } else {
        &output.stdout
    };
    let version = text.lines().next().unwrap_or("").trim().to_string();
    tracing::debug!(tool = %program, version = %version, "tool available");
    Ok(version)
}

/// Locate `tool` on `PATH`.
///
/// A `tool` that already contains a path separator is returned as-is when it
/// names an existing file.
pub fn find_on_path(tool: &str) -> Option<PathBuf> {
    if tool.contains('/') || tool.contains('\\') {
        let direct = Path::new(tool);
        return direct.is_file().then(|| direct.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    let extensions: Vec<String> = if cfg!(windows) {
        std::env::var("PATHEXT")
            .unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string())
            .split(';')
            .map(|s| s.to_ascii_lowercase())
            .collect()
    } else {
        vec![String::new()]
    };

    std::env::split_paths(&path_var).find_map(|dir| {
        extensions.iter().find_map(|ext| {
            let candidate = dir.join(format!("{tool}{ext}"));
            candidate.is_file().then_some(candidate)
        })
    })
}

fn install_hint(tool: &str) -> Option<&'static str> {
    let name = Path::new(tool)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(tool);
    match name {
        "git" => Some("https://git-scm.com/downloads"),
        "openscad" => Some("https://openscad.org/downloads.html"),
        _ => None,
    }
}
