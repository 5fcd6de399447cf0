//! Environment check: are the external tools runnable?

use std::path::PathBuf;

use colored::Colorize;
use scad_core::Workspace;
use serde::Serialize;

use crate::error::{CliError, Result};

/// Probe result for one external tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolCheck {
    /// What the tool is used for
    pub purpose: &'static str,
    /// Program as configured
    pub program: String,
    /// Resolved location on PATH, if found there
    pub location: Option<PathBuf>,
    /// First line of `--version`, or the failure message
    pub result: std::result::Result<String, String>,
}

impl ToolCheck {
    fn probe(purpose: &'static str, program: &str) -> Self {
        Self {
            purpose,
            program: program.to_string(),
            location: scad_exec::find_on_path(program),
            result: scad_exec::check_available(program).map_err(|e| e.to_string()),
        }
    }

    pub fn available(&self) -> bool {
        self.result.is_ok()
    }
}

/// Probe git and the renderer as configured for `workspace`.
pub fn check_tools(workspace: &Workspace) -> Vec<ToolCheck> {
    let config = workspace.config();
    vec![
        ToolCheck::probe("library sync", &config.git.program),
        ToolCheck::probe("rendering", &config.render.program),
    ]
}

/// Run `check`
pub fn run_check(workspace: &Workspace, json: bool) -> Result<()> {
    let checks = check_tools(workspace);

    if json {
        println!("{}", serde_json::to_string_pretty(&checks)?);
    } else {
        println!("{}", "Environment".bold());
        println!();
        for check in &checks {
            match &check.result {
                Ok(version) => {
                    let location = check
                        .location
                        .as_ref()
                        .map(|p| format!(" ({})", p.display()))
                        .unwrap_or_default();
                    println!(
                        "  {} {} - {}{}",
                        "✓".green(),
                        check.program.cyan(),
                        version,
                        location.dimmed()
                    );
                }
                Err(message) => {
                    println!("  {} {} ({})", "✗".red(), check.program.cyan(), check.purpose);
                    for line in message.lines() {
                        println!("      {line}");
                    }
                }
            }
        }
    }

    let missing: Vec<_> = checks
        .iter()
        .filter(|c| !c.available())
        .map(|c| c.program.as_str())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CliError::user(format!("missing tools: {}", missing.join(", "))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scad_core::WorkspaceConfig;
    use scad_fs::NormalizedPath;

    #[test]
    fn test_missing_tools_are_reported() {
        let mut config = WorkspaceConfig::default();
        config.git.program = "scadkit-no-such-git".into();
        config.render.program = "scadkit-no-such-openscad".into();
        let workspace = Workspace::with_config(NormalizedPath::new("/tmp"), config);

        let checks = check_tools(&workspace);

        assert_eq!(checks.len(), 2);
        assert!(checks.iter().all(|c| !c.available()));
        assert!(checks.iter().all(|c| c.location.is_none()));
        assert!(run_check(&workspace, true).is_err());
    }
}
