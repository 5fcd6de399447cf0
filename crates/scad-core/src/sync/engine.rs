//! Synchronizer implementation
//!
//! The Synchronizer reconciles the libraries root with a catalog, one
//! library at a time, through a [`VcsClient`].

use std::fs;
use std::path::{Path, PathBuf};

use scad_fs::{NormalizedPath, WorkspacePath};
use scad_git::{VcsClient, is_working_copy};

use crate::catalog::{Catalog, LibraryEntry};
use crate::Result;

use super::report::{BatchReport, ReconcileAction, ReconcileOutcome};
use super::status::{LibraryStatus, LocalLibraryState, Presence, StatusReport, UNKNOWN};

/// Progress notification from a reconciliation run
#[derive(Debug, Clone, Copy)]
pub enum SyncEvent<'a> {
    /// About to act on a library
    Starting {
        entry: &'a LibraryEntry,
        action: ReconcileAction,
    },
    /// Finished with a library
    Finished(&'a ReconcileOutcome),
}

/// Keeps a directory of library working copies in line with a catalog
///
/// Holds only the catalog, the libraries root and the client. Local state is
/// recomputed from disk on every call.
///
/// Callers should run [`Synchronizer::check_available`] once before any
/// reconciliation so a missing client fails before the filesystem is touched.
pub struct Synchronizer<V: VcsClient> {
    catalog: Catalog,
    libraries_root: NormalizedPath,
    vcs: V,
}

impl<V: VcsClient> Synchronizer<V> {
    pub fn new(catalog: Catalog, libraries_root: NormalizedPath, vcs: V) -> Self {
        Self {
            catalog,
            libraries_root,
            vcs,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn libraries_root(&self) -> &NormalizedPath {
        &self.libraries_root
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    /// Where the working copy for `name` lives.
    pub fn library_path(&self, name: &str) -> NormalizedPath {
        self.libraries_root.join(name)
    }

    /// Probe the client. Returns its version string.
    pub fn check_available(&self) -> Result<String> {
        Ok(self.vcs.check_available()?)
    }

    /// Classify `dir` without asking the client anything.
    pub fn presence_of(dir: impl AsRef<Path>) -> Presence {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            Presence::Absent
        } else if is_working_copy(dir) {
            Presence::VersionControlled
        } else {
            Presence::PlainDirectory
        }
    }

    /// Derive the local state of the library directory `dir`.
    ///
    /// Query failures leave the affected field at "unknown".
    pub fn local_state(&self, dir: &NormalizedPath) -> LocalLibraryState {
        self.state_with(Self::presence_of(dir), dir)
    }

    fn state_with(&self, presence: Presence, dir: &NormalizedPath) -> LocalLibraryState {
        match presence {
            Presence::Absent => LocalLibraryState::absent(),
            Presence::PlainDirectory => LocalLibraryState::plain_directory(),
            Presence::VersionControlled => {
                let current_revision = self.vcs.query_revision(dir).unwrap_or_else(|e| {
                    tracing::debug!(path = %dir, error = %e, "revision query failed");
                    UNKNOWN.to_string()
                });
                let remote_location = self.vcs.query_remote(dir).unwrap_or_else(|e| {
                    tracing::debug!(path = %dir, error = %e, "remote query failed");
                    UNKNOWN.to_string()
                });
                LocalLibraryState {
                    presence: Presence::VersionControlled,
                    current_revision,
                    remote_location,
                }
            }
        }
    }

    /// Status of every catalogued library and every uncatalogued directory.
    ///
    /// Fails only when the libraries root exists but cannot be listed.
    pub fn get_status(&self) -> Result<StatusReport> {
        let on_disk = self.list_library_dirs()?;

        let mut rows: Vec<LibraryStatus> = self
            .catalog
            .iter()
            .map(|entry| {
                let path = self.library_path(&entry.name);
                let state = match on_disk.iter().find(|(name, _)| *name == entry.name) {
                    Some((_, native)) => self.state_with(Self::presence_of(native), &path),
                    None => LocalLibraryState::absent(),
                };
                LibraryStatus {
                    name: entry.name.clone(),
                    path,
                    catalogued: true,
                    state,
                }
            })
            .collect();

        // on_disk is sorted. Classify the native path, the name may be lossy
        for (name, native) in on_disk.iter().filter(|(n, _)| !self.catalog.contains(n)) {
            let path = NormalizedPath::new(native);
            rows.push(LibraryStatus {
                name: name.clone(),
                state: self.state_with(Self::presence_of(native), &path),
                path,
                catalogued: false,
            });
        }

        Ok(StatusReport::new(rows))
    }

    /// Reconcile a single library.
    ///
    /// Only an unknown name is an `Err`; clone and pull failures are
    /// reported in the returned outcome.
    pub fn reconcile_one(&self, name: &str) -> Result<ReconcileOutcome> {
        self.reconcile_one_with(name, |_| {})
    }

    /// [`Synchronizer::reconcile_one`] with progress notifications.
    pub fn reconcile_one_with(
        &self,
        name: &str,
        mut observer: impl FnMut(SyncEvent<'_>),
    ) -> Result<ReconcileOutcome> {
        let entry = self.catalog.require(name)?;
        Ok(self.reconcile_entry(entry, &mut observer))
    }

    /// Reconcile every catalog entry in catalog order.
    ///
    /// A failing entry never stops the run.
    pub fn reconcile_all(&self) -> BatchReport {
        self.reconcile_all_with(|_| {})
    }

    /// [`Synchronizer::reconcile_all`] with progress notifications.
    pub fn reconcile_all_with(&self, mut observer: impl FnMut(SyncEvent<'_>)) -> BatchReport {
        let outcomes = self
            .catalog
            .iter()
            .map(|entry| self.reconcile_entry(entry, &mut observer))
            .collect();
        BatchReport { outcomes }
    }

    fn reconcile_entry(
        &self,
        entry: &LibraryEntry,
        observer: &mut impl FnMut(SyncEvent<'_>),
    ) -> ReconcileOutcome {
        let path = self.library_path(&entry.name);
        let action = match Self::presence_of(&path) {
            Presence::Absent => ReconcileAction::Clone,
            Presence::VersionControlled => ReconcileAction::Pull,
            Presence::PlainDirectory => ReconcileAction::Skip,
        };
        observer(SyncEvent::Starting { entry, action });

        let result = match action {
            ReconcileAction::Clone => self.clone_entry(entry, &path),
            ReconcileAction::Pull => {
                tracing::info!(library = %entry.name, "updating library");
                self.vcs.pull(&path).map_err(|e| e.diagnostic())
            }
            ReconcileAction::Skip => {
                tracing::warn!(
                    library = %entry.name,
                    path = %path,
                    "not a version-controlled copy, skipping"
                );
                Err(format!("{path} exists but is not a version-controlled copy"))
            }
        };

        if let Err(diagnostic) = &result {
            tracing::debug!(library = %entry.name, %action, diagnostic = %diagnostic, "reconcile failed");
        }
        let outcome = ReconcileOutcome {
            name: entry.name.clone(),
            action,
            result,
        };
        observer(SyncEvent::Finished(&outcome));
        outcome
    }

    fn clone_entry(
        &self,
        entry: &LibraryEntry,
        path: &NormalizedPath,
    ) -> std::result::Result<(), String> {
        scad_fs::io::ensure_dir(&self.libraries_root).map_err(|e| e.to_string())?;
        tracing::info!(library = %entry.name, url = %entry.source_location, "fetching library");
        self.vcs
            .clone_repo(&entry.source_location, path)
            .map_err(|e| e.diagnostic())
    }

    /// Directories directly under the libraries root, sorted by name.
    fn list_library_dirs(&self) -> Result<Vec<(String, PathBuf)>> {
        let root = self.libraries_root.to_native();
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for dir_entry in fs::read_dir(&root).map_err(|e| scad_fs::Error::io(&root, e))? {
            let dir_entry = dir_entry.map_err(|e| scad_fs::Error::io(&root, e))?;
            let path = dir_entry.path();
            let name = dir_entry.file_name().to_string_lossy().into_owned();
            if name == WorkspacePath::GitDir.as_str() || !path.is_dir() {
                continue;
            }
            names.push((name, path));
        }
        names.sort();
        Ok(names)
    }
}

impl<V: VcsClient> std::fmt::Debug for Synchronizer<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synchronizer")
            .field("libraries_root", &self.libraries_root)
            .field("catalog_len", &self.catalog.len())
            .field("vcs", &self.vcs.name())
            .finish()
    }
}
