use pretty_assertions::assert_eq;
use scad_fs::{ConfigStore, Error, NormalizedPath};
use serde::Deserialize;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Default, Deserialize, PartialEq)]
struct Sample {
    #[serde(default)]
    name: String,
    #[serde(default)]
    size: Vec<u32>,
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("scadkit.toml");
    fs::write(&file, "name = \"bracket\"\nsize = [800, 600]\n").unwrap();

    let loaded: Sample = ConfigStore::new().load(&NormalizedPath::new(&file)).unwrap();
    assert_eq!(
        loaded,
        Sample {
            name: "bracket".into(),
            size: vec![800, 600],
        }
    );
}

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("scadkit.json");
    fs::write(&file, r#"{"name": "hinge"}"#).unwrap();

    let loaded: Sample = ConfigStore::new().load(&NormalizedPath::new(&file)).unwrap();
    assert_eq!(loaded.name, "hinge");
    assert!(loaded.size.is_empty());
}

#[test]
fn test_load_rejects_unknown_extension() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("scadkit.ini");
    fs::write(&file, "name=x").unwrap();

    let result: Result<Sample, _> = ConfigStore::new().load(&NormalizedPath::new(&file));
    assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
}

#[test]
fn test_load_reports_parse_errors() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("scadkit.toml");
    fs::write(&file, "name = [unterminated").unwrap();

    let result: Result<Sample, _> = ConfigStore::new().load(&NormalizedPath::new(&file));
    match result {
        Err(Error::ConfigParse { format, .. }) => assert_eq!(format, "TOML"),
        other => panic!("expected ConfigParse, got {other:?}"),
    }
}

#[test]
fn test_load_or_default_missing_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("scadkit.toml");

    let loaded: Sample = ConfigStore::new()
        .load_or_default(&NormalizedPath::new(&file))
        .unwrap();
    assert_eq!(loaded, Sample::default());
}
