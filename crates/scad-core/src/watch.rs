//! Modification-time polling for watch mode

use std::time::SystemTime;

use chrono::{DateTime, Local};
use scad_fs::NormalizedPath;

/// Tracks a file's modification time between polls.
#[derive(Debug, Clone)]
pub struct ChangeWatcher {
    path: NormalizedPath,
    last_seen: Option<SystemTime>,
}

impl ChangeWatcher {
    pub fn new(path: NormalizedPath) -> Self {
        Self {
            path,
            last_seen: None,
        }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// True when the file changed since the previous poll.
    ///
    /// The first successful poll always reports a change. A file that cannot
    /// be read (e.g. mid-save) reports no change.
    pub fn poll(&mut self) -> bool {
        let modified = match std::fs::metadata(self.path.to_native()).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                tracing::debug!(path = %self.path, error = %e, "cannot read modification time");
                return false;
            }
        };

        let changed = self.last_seen.is_none_or(|seen| modified > seen);
        if changed {
            self.last_seen = Some(modified);
        }
        changed
    }

    /// Modification time seen by the last poll that reported a change.
    pub fn last_modified(&self) -> Option<DateTime<Local>> {
        self.last_seen.map(DateTime::<Local>::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{File, FileTimes};
    use std::time::Duration;
    use tempfile::TempDir;

    fn set_mtime(path: &std::path::Path, time: SystemTime) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_times(FileTimes::new().set_modified(time)).unwrap();
    }

    #[test]
    fn test_first_poll_triggers_then_settles() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("part.scad");
        std::fs::write(&file, "cube(1);").unwrap();

        let mut watcher = ChangeWatcher::new(NormalizedPath::new(&file));
        assert!(watcher.poll());
        assert!(!watcher.poll());
        assert!(watcher.last_modified().is_some());
    }

    #[test]
    fn test_newer_mtime_triggers() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("part.scad");
        std::fs::write(&file, "cube(1);").unwrap();
        let base = SystemTime::now() - Duration::from_secs(60);
        set_mtime(&file, base);

        let mut watcher = ChangeWatcher::new(NormalizedPath::new(&file));
        assert!(watcher.poll());

        set_mtime(&file, base + Duration::from_secs(5));
        assert!(watcher.poll());
        assert!(!watcher.poll());
    }

    #[test]
    fn test_older_mtime_does_not_trigger() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("part.scad");
        std::fs::write(&file, "cube(1);").unwrap();
        let base = SystemTime::now() - Duration::from_secs(60);
        set_mtime(&file, base);

        let mut watcher = ChangeWatcher::new(NormalizedPath::new(&file));
        assert!(watcher.poll());

        set_mtime(&file, base - Duration::from_secs(30));
        assert!(!watcher.poll());
    }

    #[test]
    fn test_missing_file_never_triggers() {
        let temp = TempDir::new().unwrap();
        let mut watcher = ChangeWatcher::new(NormalizedPath::new(temp.path().join("gone.scad")));
        assert!(!watcher.poll());
        assert!(watcher.last_modified().is_none());
    }
}
