//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// scadkit - Manage an OpenSCAD workspace: libraries, projects and previews
#[derive(Parser, Debug)]
#[command(name = "scadkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Workspace root (default: nearest directory with scadkit.toml, else the current directory)
    #[arg(long, global = true, env = "SCADKIT_ROOT")]
    pub root: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Manage third-party OpenSCAD libraries
    Libs {
        /// Library action to perform
        #[command(subcommand)]
        action: LibsAction,
    },

    /// Create and list projects
    Project {
        /// Project action to perform
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Render a .scad file to STL and a PNG preview
    ///
    /// Examples:
    ///   scadkit render projects/gear/gear.scad
    ///   scadkit render gear.scad --no-stl --watch
    Render {
        /// Source file to render
        file: PathBuf,

        /// Skip the STL export
        #[arg(long)]
        no_stl: bool,

        /// Skip the PNG preview
        #[arg(long)]
        no_png: bool,

        /// Re-render whenever the file changes (Ctrl+C to stop)
        #[arg(short, long)]
        watch: bool,
    },

    /// Check that git and openscad are installed
    Check {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Library actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum LibsAction {
    /// List the libraries scadkit knows about
    Catalog,

    /// Show the local state of every library
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Clone missing libraries and update existing ones
    ///
    /// Examples:
    ///   scadkit libs sync bosl2     # One library
    ///   scadkit libs sync --all     # Every catalogued library
    Sync {
        /// Library name (exact, case-sensitive); `all` syncs everything
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        name: Option<String>,

        /// Sync every catalogued library
        #[arg(long)]
        all: bool,
    },
}

/// Project actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ProjectAction {
    /// Create a new project from the workspace template
    New {
        /// Project name (also the directory and main file name)
        name: String,

        /// Short description substituted into the template
        #[arg(default_value = "")]
        description: String,
    },

    /// List existing projects
    List,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from(["scadkit"]);
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["scadkit", "libs", "status", "-v", "--root", "/work/cad"]);
        assert!(cli.verbose);
        assert_eq!(cli.root, Some(PathBuf::from("/work/cad")));
    }

    #[test]
    fn parse_libs_status_json() {
        let cli = Cli::parse_from(["scadkit", "libs", "status", "--json"]);
        assert_eq!(
            cli.command,
            Some(Commands::Libs {
                action: LibsAction::Status { json: true }
            })
        );
    }

    #[test]
    fn parse_libs_sync_name() {
        let cli = Cli::parse_from(["scadkit", "libs", "sync", "bosl2"]);
        assert_eq!(
            cli.command,
            Some(Commands::Libs {
                action: LibsAction::Sync {
                    name: Some("bosl2".into()),
                    all: false
                }
            })
        );
    }

    #[test]
    fn parse_libs_sync_all_flag() {
        let cli = Cli::parse_from(["scadkit", "libs", "sync", "--all"]);
        assert_eq!(
            cli.command,
            Some(Commands::Libs {
                action: LibsAction::Sync {
                    name: None,
                    all: true
                }
            })
        );
    }

    #[test]
    fn parse_libs_sync_requires_target() {
        assert!(Cli::try_parse_from(["scadkit", "libs", "sync"]).is_err());
    }

    #[test]
    fn parse_libs_sync_name_conflicts_with_all() {
        assert!(Cli::try_parse_from(["scadkit", "libs", "sync", "bosl2", "--all"]).is_err());
    }

    #[test]
    fn parse_project_new_default_description() {
        let cli = Cli::parse_from(["scadkit", "project", "new", "gearbox"]);
        assert_eq!(
            cli.command,
            Some(Commands::Project {
                action: ProjectAction::New {
                    name: "gearbox".into(),
                    description: String::new()
                }
            })
        );
    }

    #[test]
    fn parse_project_new_requires_name() {
        assert!(Cli::try_parse_from(["scadkit", "project", "new"]).is_err());
    }

    #[test]
    fn parse_render_flags() {
        let cli = Cli::parse_from(["scadkit", "render", "gear.scad", "--no-png", "--watch"]);
        assert_eq!(
            cli.command,
            Some(Commands::Render {
                file: PathBuf::from("gear.scad"),
                no_stl: false,
                no_png: true,
                watch: true
            })
        );
    }

    #[test]
    fn parse_render_requires_file() {
        assert!(Cli::try_parse_from(["scadkit", "render"]).is_err());
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["scadkit", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Completions { shell: Shell::Bash })
        ));
    }
}
