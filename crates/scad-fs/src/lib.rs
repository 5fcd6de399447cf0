//! Filesystem abstraction for scadkit
//!
//! Provides normalized paths, the well-known workspace directory names,
//! atomic writes, and format-agnostic config loading.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::WorkspacePath;
pub use error::{Error, Result};
pub use path::{NormalizedPath, validate_path_identifier};
