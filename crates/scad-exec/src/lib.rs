//! External tool execution for scadkit
//!
//! Every feature of scadkit ends in a subprocess: `git` for library
//! synchronization and `openscad` for previews. This crate owns the two
//! pieces they share:
//!
//! - [`capture`] runs a prepared [`std::process::Command`] to completion and
//!   returns its exit status and output streams as a [`CommandOutput`]
//! - [`check_available`] probes a tool with `--version` so callers can refuse
//!   to start when the tool is missing

pub mod command;
pub mod error;
pub mod probe;

pub use command::{CommandOutput, capture, describe};
pub use error::{ExecError, Result};
pub use probe::{check_available, find_on_path};
