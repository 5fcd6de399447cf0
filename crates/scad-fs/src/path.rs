//! Normalized path handling
//!
//! Workspace paths are shown to users and written into JSON reports, so they
//! are kept with forward slashes internally and only converted to native
//! form at I/O boundaries.

use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let normalized = path.as_ref().to_string_lossy().replace('\\', "/");
        Self { inner: normalized }
    }

    /// Resolve `path` to an absolute path without `.`/`..` components.
    ///
    /// Uses `dunce` so Windows paths do not gain a `\\?\` prefix. Falls back
    /// to the path as given when it does not exist yet.
    pub fn canonical(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match dunce::canonicalize(path) {
            Ok(resolved) => Self::new(resolved),
            Err(_) => Self::new(path),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    ///
    /// An absolute segment replaces the path, matching [`Path::join`].
    pub fn join(&self, segment: impl AsRef<Path>) -> Self {
        let segment = segment.as_ref();
        if segment.is_absolute() {
            return Self::new(segment);
        }
        let segment = segment.to_string_lossy().replace('\\', "/");
        let inner = if self.inner.is_empty() {
            segment
        } else if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            None => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the file name without its extension.
    pub fn file_stem(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[..idx]),
            _ => Some(name),
        }
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            (idx > 0).then(|| &name[idx + 1..])
        })
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

/// Validate a single path component used as a library or project name.
///
/// Names become directory names directly under a workspace folder, so they
/// must not be empty, must not contain separators, and must not start with a
/// dot (which would also cover `.` / `..` and hidden directories).
pub fn validate_path_identifier(name: &str) -> Result<()> {
    let invalid = |reason: &str| {
        Err(Error::InvalidIdentifier {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.trim().is_empty() {
        return invalid("name is empty");
    }
    if name.contains('/') || name.contains('\\') {
        return invalid("name contains a path separator");
    }
    if name.starts_with('.') {
        return invalid("name starts with '.'");
    }
    if name.chars().any(char::is_control) {
        return invalid("name contains control characters");
    }
    Ok(())
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Serialize for NormalizedPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_backslashes_are_normalized() {
        let path = NormalizedPath::new("C:\\work\\libraries\\bosl2");
        assert_eq!(path.as_str(), "C:/work/libraries/bosl2");
    }

    #[test]
    fn test_join_absolute_segment_replaces() {
        let base = NormalizedPath::new("/work");
        assert_eq!(base.join("/elsewhere/libs").as_str(), "/elsewhere/libs");
        assert_eq!(base.join("libraries").as_str(), "/work/libraries");
    }

    #[test]
    fn test_parent_and_file_name() {
        let path = NormalizedPath::new("/work/projects/gear/gear.scad");
        assert_eq!(path.file_name(), Some("gear.scad"));
        assert_eq!(path.file_stem(), Some("gear"));
        assert_eq!(path.extension(), Some("scad"));
        assert_eq!(path.parent().unwrap().as_str(), "/work/projects/gear");
        assert_eq!(NormalizedPath::new("/work").parent().unwrap().as_str(), "/");
    }

    #[test]
    fn test_hidden_file_has_no_extension() {
        let path = NormalizedPath::new("/work/.gitignore");
        assert_eq!(path.extension(), None);
        assert_eq!(path.file_stem(), Some(".gitignore"));
    }

    #[test]
    fn test_serializes_as_string() {
        let path = NormalizedPath::new("libraries/bosl2");
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"libraries/bosl2\"");
    }

    #[rstest]
    #[case("bosl2")]
    #[case("round-anything")]
    #[case("My Gearbox")]
    fn test_valid_identifiers(#[case] name: &str) {
        assert!(validate_path_identifier(name).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("a/b")]
    #[case("a\\b")]
    #[case(".")]
    #[case("..")]
    #[case(".git")]
    fn test_invalid_identifiers(#[case] name: &str) {
        assert!(matches!(
            validate_path_identifier(name),
            Err(Error::InvalidIdentifier { .. })
        ));
    }
}
