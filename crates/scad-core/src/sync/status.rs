//! Status types for library synchronization
//!
//! A status report is derived from the filesystem and the version-control
//! client on every query and is never persisted.

use std::fmt;

use scad_fs::NormalizedPath;
use serde::Serialize;

/// Placeholder for a field the client could not determine
pub const UNKNOWN: &str = "unknown";

/// What exists on disk for a library name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// No directory with that name
    Absent,
    /// Directory with version-control metadata
    VersionControlled,
    /// Directory without version-control metadata
    PlainDirectory,
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Absent => "absent",
            Self::VersionControlled => "version-controlled",
            Self::PlainDirectory => "plain directory",
        };
        f.write_str(text)
    }
}

/// Local state of one library
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalLibraryState {
    pub presence: Presence,
    /// Checked-out commit, or [`UNKNOWN`]
    pub current_revision: String,
    /// Configured remote address, or [`UNKNOWN`]
    pub remote_location: String,
}

impl LocalLibraryState {
    pub fn absent() -> Self {
        Self::without_metadata(Presence::Absent)
    }

    pub fn plain_directory() -> Self {
        Self::without_metadata(Presence::PlainDirectory)
    }

    fn without_metadata(presence: Presence) -> Self {
        Self {
            presence,
            current_revision: UNKNOWN.to_string(),
            remote_location: UNKNOWN.to_string(),
        }
    }

    pub fn revision_known(&self) -> bool {
        self.current_revision != UNKNOWN
    }

    pub fn remote_known(&self) -> bool {
        self.remote_location != UNKNOWN
    }
}

/// One row of a [`StatusReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryStatus {
    pub name: String,
    pub path: NormalizedPath,
    /// False for directories found on disk that the catalog does not list
    pub catalogued: bool,
    #[serde(flatten)]
    pub state: LocalLibraryState,
}

/// Status of every catalogued library plus any uncatalogued directories.
///
/// Rows come in catalog order, followed by uncatalogued directories sorted
/// by name.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct StatusReport {
    rows: Vec<LibraryStatus>,
}

impl StatusReport {
    pub(crate) fn new(rows: Vec<LibraryStatus>) -> Self {
        Self { rows }
    }

    /// Row for `name`, matched exactly.
    pub fn get(&self, name: &str) -> Option<&LibraryStatus> {
        self.rows.iter().find(|r| r.name == name)
    }

    pub fn rows(&self) -> &[LibraryStatus] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &LibraryStatus> {
        self.rows.iter()
    }

    pub fn uncatalogued(&self) -> impl Iterator<Item = &LibraryStatus> {
        self.rows.iter().filter(|r| !r.catalogued)
    }

    /// Number of rows with the given presence.
    pub fn count(&self, presence: Presence) -> usize {
        self.rows
            .iter()
            .filter(|r| r.state.presence == presence)
            .count()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
