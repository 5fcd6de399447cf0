//! Library commands: catalog, status and sync

use colored::Colorize;
use scad_core::{
    BatchReport, Catalog, LibraryStatus, Presence, ReconcileAction, ReconcileOutcome, SyncEvent,
    Synchronizer, Workspace,
};
use scad_git::GitCli;

use crate::error::{CliError, Result};

/// Name accepted by `libs sync` in place of `--all`
const ALL: &str = "all";

fn synchronizer(workspace: &Workspace) -> Synchronizer<GitCli> {
    Synchronizer::new(
        Catalog::builtin(),
        workspace.libraries_root(),
        workspace.git_client(),
    )
}

/// Fail before any filesystem work when git cannot run.
fn require_git(sync: &Synchronizer<GitCli>) -> Result<()> {
    let version = sync.check_available()?;
    tracing::debug!(version = %version, "git available");
    Ok(())
}

/// Run `libs catalog`
pub fn run_catalog(workspace: &Workspace) -> Result<()> {
    let sync = synchronizer(workspace);

    println!("{}", "Library Catalog".bold());
    println!();
    for entry in sync.catalog() {
        let installed = Synchronizer::<GitCli>::presence_of(&sync.library_path(&entry.name))
            != Presence::Absent;
        let marker = if installed { "✓".green() } else { "-".dimmed() };
        println!("  {} {} - {}", marker, entry.name.cyan(), entry.description);
        println!("      {}", entry.source_location.dimmed());
    }
    println!();
    println!(
        "{} libraries. Run {} to fetch them.",
        sync.catalog().len(),
        "scadkit libs sync --all".cyan()
    );
    Ok(())
}

/// Run `libs status`
pub fn run_status(workspace: &Workspace, json: bool) -> Result<()> {
    let sync = synchronizer(workspace);
    require_git(&sync)?;
    let report = sync.get_status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Library Status".bold());
    println!("{}: {}", "Root".dimmed(), sync.libraries_root());
    println!();
    for row in report.iter() {
        print_status_row(row);
    }
    println!();
    println!(
        "{} installed, {} missing, {} not under version control",
        report.count(Presence::VersionControlled),
        report.count(Presence::Absent),
        report.count(Presence::PlainDirectory)
    );
    Ok(())
}

fn print_status_row(row: &LibraryStatus) {
    let icon = match row.state.presence {
        Presence::VersionControlled => "✓".green(),
        _ => "?".yellow(),
    };
    let mut line = format!("  {} {} ({})", icon, row.name.cyan(), row.state.presence);
    if !row.catalogued {
        line.push_str(&format!(" {}", "[uncatalogued]".yellow()));
    }
    println!("{line}");

    if row.state.presence == Presence::Absent {
        return;
    }
    println!("      {}: {}", "Path".dimmed(), row.path);
    if row.state.remote_known() {
        println!("      {}: {}", "Remote".dimmed(), row.state.remote_location);
    }
    if row.state.revision_known() {
        println!("      {}: {}", "Commit".dimmed(), short_revision(&row.state.current_revision));
    }
}

/// First eight characters of a revision id.
pub fn short_revision(revision: &str) -> &str {
    revision.char_indices().nth(8).map_or(revision, |(i, _)| &revision[..i])
}

/// Run `libs sync`
pub fn run_sync(workspace: &Workspace, name: Option<&str>, all: bool) -> Result<()> {
    let sync = synchronizer(workspace);

    // Unknown names are configuration errors: report them before probing git
    let single = match name {
        Some(name) if !all && name != ALL => Some(sync.catalog().require(name)?.name.clone()),
        _ => None,
    };
    require_git(&sync)?;

    match single {
        Some(name) => {
            let outcome = sync.reconcile_one_with(&name, print_event)?;
            if outcome.success() {
                Ok(())
            } else {
                Err(CliError::user(format!("failed to sync '{}'", outcome.name)))
            }
        }
        None => {
            println!(
                "Syncing {} libraries into {}",
                sync.catalog().len(),
                sync.libraries_root()
            );
            println!();
            let report = sync.reconcile_all_with(print_event);
            print_summary(&report);
            if report.all_succeeded() {
                Ok(())
            } else {
                let failed = report.failures().count();
                Err(CliError::user(format!(
                    "{failed} of {} libraries failed to sync",
                    report.outcomes.len()
                )))
            }
        }
    }
}

fn print_event(event: SyncEvent<'_>) {
    match event {
        SyncEvent::Starting { entry, action } => {
            let verb = match action {
                ReconcileAction::Clone => "Cloning",
                ReconcileAction::Pull => "Updating",
                ReconcileAction::Skip => "Checking",
            };
            println!("{} {}: {}", verb.bold(), entry.name.cyan(), entry.description);
        }
        SyncEvent::Finished(outcome) => print_outcome(outcome),
    }
}

fn print_outcome(outcome: &ReconcileOutcome) {
    match &outcome.result {
        Ok(()) => {
            let done = match outcome.action {
                ReconcileAction::Clone => "downloaded",
                _ => "updated",
            };
            println!("  {} {} {}", "✓".green(), outcome.name, done);
        }
        Err(diagnostic) => {
            println!("  {} {} failed: {}", "✗".red(), outcome.name, diagnostic);
        }
    }
}

fn print_summary(report: &BatchReport) {
    println!();
    let failed = report.failures().count();
    let summary = format!(
        "{} succeeded, {} failed",
        report.succeeded_count(),
        failed
    );
    if failed == 0 {
        println!("{} {}", "Done:".green().bold(), summary);
    } else {
        println!("{} {}", "Done:".yellow().bold(), summary);
        for outcome in report.failures() {
            println!("  {} {}", "✗".red(), outcome.name);
        }
    }
}
