//! Command implementations for scad-cli

pub mod check;
pub mod libs;
pub mod project;
pub mod render;

pub use check::run_check;
pub use libs::{run_catalog, run_status, run_sync};
pub use project::{run_list, run_new};
pub use render::{RenderOptions, run_render};
