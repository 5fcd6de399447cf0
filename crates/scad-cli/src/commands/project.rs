//! Project commands

use colored::Colorize;
use scad_core::{Workspace, create_project, list_projects};

use crate::error::Result;

/// Run `project new`
pub fn run_new(workspace: &Workspace, name: &str, description: &str) -> Result<()> {
    let created = create_project(workspace, name, description)?;

    println!("{} Project '{}' created", "✓".green(), created.name.cyan());
    println!("  {}: {}", "Location".dimmed(), created.directory);
    println!("  {}: {}", "Main file".dimmed(), created.main_file);
    println!();
    println!("Next steps:");
    println!("  1. Open {}", created.main_file);
    println!("  2. Customize the parameters section");
    println!("  3. Uncomment the libraries you need");
    println!(
        "  4. Preview with {}",
        format!("scadkit render {} --watch", created.main_file).cyan()
    );
    Ok(())
}

/// Run `project list`
pub fn run_list(workspace: &Workspace) -> Result<()> {
    let projects = list_projects(workspace)?;

    if projects.is_empty() {
        println!("{}", "No projects found".dimmed());
        println!();
        println!("Run {} to create one.", "scadkit project new <NAME>".cyan());
        return Ok(());
    }

    println!("{}", "Projects".bold());
    println!();
    for project in &projects {
        let files = match project.scad_files {
            0 => "no .scad files".dimmed().to_string(),
            1 => "1 .scad file".to_string(),
            n => format!("{n} .scad files"),
        };
        println!("  {} ({})", project.name.cyan(), files);
        println!("      {}", project.path.to_string().dimmed());
    }
    Ok(())
}
