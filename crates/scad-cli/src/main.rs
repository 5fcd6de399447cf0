//! scadkit CLI
//!
//! Command-line interface for an OpenSCAD workspace: library sync, project
//! scaffolding and preview rendering.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use std::io;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::{Cli, Commands, LibsAction, ProjectAction};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Some(cmd) => execute_command(cmd, cli.root.as_deref()),
        None => {
            println!(
                "{} OpenSCAD workspace manager",
                "scadkit".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "scadkit --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, root: Option<&std::path::Path>) -> Result<()> {
    // Completions need no workspace
    if let Commands::Completions { shell } = &cmd {
        clap_complete::generate(*shell, &mut Cli::command(), "scadkit", &mut io::stdout());
        return Ok(());
    }

    let workspace = context::load_workspace(root)?;
    match cmd {
        Commands::Libs { action } => match action {
            LibsAction::Catalog => commands::run_catalog(&workspace),
            LibsAction::Status { json } => commands::run_status(&workspace, json),
            LibsAction::Sync { name, all } => {
                commands::run_sync(&workspace, name.as_deref(), all)
            }
        },
        Commands::Project { action } => match action {
            ProjectAction::New { name, description } => {
                commands::run_new(&workspace, &name, &description)
            }
            ProjectAction::List => commands::run_list(&workspace),
        },
        Commands::Render {
            file,
            no_stl,
            no_png,
            watch,
        } => commands::run_render(
            &workspace,
            &file,
            commands::RenderOptions {
                stl: !no_stl,
                png: !no_png,
                watch,
            },
        ),
        Commands::Check { json } => commands::run_check(&workspace, json),
        Commands::Completions { .. } => Ok(()),
    }
}
