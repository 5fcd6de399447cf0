//! Library synchronization
//!
//! This module provides:
//! - **status**: derive each library's local state from disk and the client
//! - **report**: per-library reconciliation outcomes and batch summaries
//! - **engine**: the [`Synchronizer`] that clones, pulls, or skips each entry

mod engine;
mod report;
mod status;

pub use engine::{SyncEvent, Synchronizer};
pub use report::{BatchReport, ReconcileAction, ReconcileOutcome};
pub use status::{LibraryStatus, LocalLibraryState, Presence, StatusReport, UNKNOWN};
