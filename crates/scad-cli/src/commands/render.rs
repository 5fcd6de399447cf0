//! Render command, one-shot and watch mode

use std::path::Path;
use std::thread;

use chrono::Local;
use colored::Colorize;
use scad_core::{
    ChangeWatcher, OpenScad, RenderReport, RenderRequest, Renderer, Workspace, render_file,
};
use scad_fs::NormalizedPath;

use crate::error::{CliError, Result};

/// Which artifacts to produce
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub stl: bool,
    pub png: bool,
    pub watch: bool,
}

/// Run `render`
pub fn run_render(workspace: &Workspace, file: &Path, options: RenderOptions) -> Result<()> {
    if !options.stl && !options.png {
        return Err(CliError::user("nothing to render: both --no-stl and --no-png given"));
    }

    let config = &workspace.config().render;
    let renderer = OpenScad::new(&config.program);
    let version = renderer.check_available()?;
    tracing::debug!(version = %version, "renderer available");

    let source = NormalizedPath::new(std::env::current_dir()?.join(file));
    let request = RenderRequest {
        stl: options.stl,
        png: options.png,
        image_size: config.image_size,
        ..RenderRequest::new(source, workspace.renders_root())
    };

    if options.watch {
        watch(&renderer, &request, config.poll_interval())
    } else {
        let report = render_once(&renderer, &request)?;
        if report.all_succeeded() {
            Ok(())
        } else {
            Err(CliError::user(format!("rendering {} failed", request.source)))
        }
    }
}

fn render_once(renderer: &dyn Renderer, request: &RenderRequest) -> Result<RenderReport> {
    println!("Rendering {}...", request.source.to_string().cyan());
    let report = render_file(renderer, request)?;
    for artifact in &report.artifacts {
        match &artifact.result {
            Ok(()) => println!("  {} {} generated: {}", "✓".green(), artifact.kind, artifact.output),
            Err(message) => println!("  {} {} failed: {}", "✗".red(), artifact.kind, message),
        }
    }
    Ok(report)
}

/// Poll the source and re-render on every change until interrupted.
fn watch(renderer: &dyn Renderer, request: &RenderRequest, interval: std::time::Duration) -> Result<()> {
    if !request.source.is_file() {
        return Err(scad_core::CoreError::SourceMissing {
            path: request.source.to_native(),
        }
        .into());
    }

    println!("Watching {} for changes...", request.source.to_string().cyan());
    println!("Press Ctrl+C to stop");

    let mut watcher = ChangeWatcher::new(request.source.clone());
    loop {
        if watcher.poll() {
            println!();
            println!("{} - File changed, rendering...", Local::now().format("%H:%M:%S"));
            // A failed render (or a file deleted mid-save) must not end the loop
            if let Err(e) = render_once(renderer, request) {
                println!("  {} {}", "✗".red(), e);
            }
        }
        thread::sleep(interval);
    }
}
