use assert_fs::prelude::*;
use predicates::prelude::*;
use scad_fs::{NormalizedPath, io};

#[test]
fn test_write_atomic_creates_file_and_parents() {
    let temp = assert_fs::TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.child("projects/gear/gear.scad").path());

    io::write_atomic(&path, b"cube(10);").unwrap();

    temp.child("projects/gear/gear.scad")
        .assert(predicate::str::diff("cube(10);"));
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("part.scad");
    file.write_str("original").unwrap();

    io::write_text(&NormalizedPath::new(file.path()), "updated").unwrap();

    file.assert("updated");
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = assert_fs::TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.child("part.scad").path());

    io::write_atomic(&path, b"sphere(5);").unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[test]
fn test_write_atomic_into_file_parent_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("blocker").touch().unwrap();
    let path = NormalizedPath::new(temp.child("blocker/part.scad").path());

    assert!(io::write_atomic(&path, b"x").is_err());
}

#[test]
fn test_read_text_missing_file_reports_path() {
    let path = NormalizedPath::new("/nonexistent/template.scad");
    let err = io::read_text(&path).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/template.scad"));
}

#[test]
fn test_ensure_dir_is_idempotent() {
    let temp = assert_fs::TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.child("libraries").path());

    io::ensure_dir(&path).unwrap();
    io::ensure_dir(&path).unwrap();

    temp.child("libraries").assert(predicate::path::is_dir());
}
