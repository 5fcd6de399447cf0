//! The catalog of known OpenSCAD libraries
//!
//! A [`Catalog`] is an ordered set of [`LibraryEntry`] records keyed by name.
//! Order is insertion order and drives both display and batch
//! reconciliation. The catalog is handed to the synchronizer at
//! construction; [`Catalog::builtin`] is the one shipped with scadkit.

use serde::Serialize;

use crate::{CoreError, Result};

/// One library the workspace knows how to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryEntry {
    /// Directory name under the libraries root
    pub name: String,
    /// Remote address to clone from
    pub source_location: String,
    /// Human-readable text, display only
    pub description: String,
}

impl LibraryEntry {
    pub fn new(
        name: impl Into<String>,
        source_location: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_location: source_location.into(),
            description: description.into(),
        }
    }
}

/// Ordered collection of library entries with unique names.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    entries: Vec<LibraryEntry>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate or unusable names.
    pub fn new(entries: impl IntoIterator<Item = LibraryEntry>) -> Result<Self> {
        let mut catalog = Self::default();
        for entry in entries {
            catalog.push(entry)?;
        }
        Ok(catalog)
    }

    /// Append an entry.
    ///
    /// Names become directory names, so they are validated like any other
    /// path identifier.
    pub fn push(&mut self, entry: LibraryEntry) -> Result<()> {
        scad_fs::validate_path_identifier(&entry.name)?;
        if self.contains(&entry.name) {
            return Err(CoreError::DuplicateLibrary { name: entry.name });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Look up an entry by exact, case-sensitive name.
    pub fn get(&self, name: &str) -> Option<&LibraryEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Like [`Catalog::get`], but an unknown name is an error.
    pub fn require(&self, name: &str) -> Result<&LibraryEntry> {
        self.get(name).ok_or_else(|| CoreError::UnknownLibrary {
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LibraryEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The catalog shipped with scadkit.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(name, url, description)| LibraryEntry::new(*name, *url, *description))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a LibraryEntry;
    type IntoIter = std::slice::Iter<'a, LibraryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// General purpose libraries first, then single-topic ones
const BUILTIN: &[(&str, &str, &str)] = &[
    ("bosl", "https://github.com/revarbat/BOSL.git", "Belfry OpenScad Library v1"),
    ("bosl2", "https://github.com/revarbat/BOSL2.git", "Belfry OpenScad Library v2 (beta)"),
    ("dotscad", "https://github.com/JustinSDK/dotSCAD.git", "Mathematical 3D modeling utilities"),
    ("nopscadlib", "https://github.com/nophead/NopSCADlib.git", "Parts for 3D printers and electronics enclosures"),
    ("ub-scad", "https://github.com/UBaer21/UB.scad.git", "Full 3D printing workflow solution"),
    ("functional-openscad", "https://github.com/JustinSDK/FunctionalOpenSCAD.git", "Functional programming in OpenSCAD"),
    ("constructive", "https://github.com/revarbat/Constructive.git", "Complex mechanical parts with stamping approach"),
    ("stoneagelib", "https://github.com/StoneAgeLib/StoneAgeLib.git", "All sorts of scripts for OpenSCAD"),
    ("bolts", "https://github.com/jreinhardt/BOLTS.git", "Open Library of Technical Specifications"),
    ("asset-collection", "https://github.com/JustinSDK/AssetCollection.git", "Mechanical parts, furniture, and models"),
    ("round-anything", "https://github.com/Irev-Dev/Round-Anything.git", "Rounding utilities"),
    ("marks-enclosure-helper", "https://github.com/MarkGalloway/EnclosureHelper.git", "Two-piece hinged boxes"),
    ("funcutils", "https://github.com/JustinSDK/funcutils.git", "Functional programming utilities"),
    ("threads-scad", "https://github.com/JohK/threads.scad.git", "Threading library"),
    ("smooth-primitives", "https://github.com/JustinSDK/SmoothPrimitives.git", "Smooth primitives with rounded edges"),
    ("function-plotting", "https://github.com/JustinSDK/FunctionPlotting.git", "Mathematical function plotting"),
    ("closepoints", "https://github.com/JustinSDK/ClosePoints.git", "Creating shapes from point lists"),
    ("tray-library", "https://github.com/JustinSDK/TrayLibrary.git", "Tray design with subdivisions"),
    ("yapp-generator", "https://github.com/YPOP/YAPP_Generator.git", "Electronic project boxes"),
    ("stemfie-parts", "https://github.com/JustinSDK/STEMFIEParts.git", "Educational construction set parts"),
    ("catch-n-hole", "https://github.com/JustinSDK/CatchNHole.git", "Nut catches and screw holes"),
    ("pathbuilder", "https://github.com/JustinSDK/Pathbuilder.git", "Complex 2D shapes with SVG syntax"),
    ("scon", "https://github.com/JustinSDK/SCON.git", "JSON-like configuration for OpenSCAD"),
    ("altair-2d", "https://github.com/JustinSDK/Altair2D.git", "2D drawing utilities"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn entry(name: &str) -> LibraryEntry {
        LibraryEntry::new(name, format!("https://example.com/{name}.git"), "")
    }

    #[test]
    fn test_preserves_insertion_order() {
        let catalog = Catalog::new([entry("zeta"), entry("alpha"), entry("mid")]).unwrap();
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_rejects_duplicate_name() {
        let err = Catalog::new([entry("lib-a"), entry("lib-a")]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateLibrary { ref name } if name == "lib-a"));
    }

    #[test]
    fn test_names_differing_in_case_are_distinct() {
        let catalog = Catalog::new([entry("bosl"), entry("BOSL")]).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_rejects_name_with_separator() {
        let err = Catalog::new([entry("../escape")]).unwrap_err();
        assert!(matches!(err, CoreError::Fs(scad_fs::Error::InvalidIdentifier { .. })));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let catalog = Catalog::new([entry("bosl2")]).unwrap();
        assert!(catalog.get("bosl2").is_some());
        assert!(catalog.get("BOSL2").is_none());
        assert!(matches!(
            catalog.require("Bosl2"),
            Err(CoreError::UnknownLibrary { .. })
        ));
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 24);
        assert_eq!(catalog.names().next(), Some("bosl"));
        assert_eq!(catalog.names().last(), Some("altair-2d"));

        let unique: HashSet<_> = catalog.names().collect();
        assert_eq!(unique.len(), catalog.len());

        let bosl2 = catalog.get("bosl2").unwrap();
        assert_eq!(bosl2.source_location, "https://github.com/revarbat/BOSL2.git");
        assert!(
            catalog
                .iter()
                .all(|e| scad_fs::validate_path_identifier(&e.name).is_ok())
        );
    }
}
