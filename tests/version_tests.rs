//! Manifest version reader tests.

use octobuild_installer::InstallerError;
use octobuild_installer::metadata::{read_version, require_version, scan_version};
use std::fs;
use std::io::Cursor;
use std::path::Path;

fn manifest(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Cargo.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn reads_fixture_version() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/Cargo.toml");
    assert_eq!(read_version(&path).unwrap().as_deref(), Some("0.4.2"));
    assert_eq!(require_version(&path).unwrap(), semver::Version::new(0, 4, 2));
}

#[test]
fn first_matching_line_wins() {
    let content = "[package]\nname = \"a\"\nversion = \"1.2.3\"\n\n[other]\nversion = \"9.9.9\"\n";
    assert_eq!(
        scan_version(Cursor::new(content)).unwrap().as_deref(),
        Some("1.2.3")
    );
}

#[test]
fn leading_whitespace_is_allowed() {
    let content = "[package]\n    version   =   \"0.1.14\"\n";
    assert_eq!(
        scan_version(Cursor::new(content)).unwrap().as_deref(),
        Some("0.1.14")
    );
}

#[test]
fn inline_table_versions_are_ignored() {
    let content = "[dependencies]\nlog = { version = \"0.4\" }\n";
    assert_eq!(scan_version(Cursor::new(content)).unwrap(), None);
}

#[test]
fn missing_version_is_none() {
    let (_dir, path) = manifest("[package]\nname = \"octobuild\"\n");
    assert_eq!(read_version(&path).unwrap(), None);
}

#[test]
fn missing_version_fails_when_required() {
    let (_dir, path) = manifest("[package]\nname = \"octobuild\"\n");
    let err = require_version(&path).unwrap_err();
    assert!(matches!(err, InstallerError::VersionNotFound { .. }));
}

#[test]
fn non_semver_version_is_rejected() {
    let (_dir, path) = manifest("version = \"latest\"\n");
    let err = require_version(&path).unwrap_err();
    assert!(matches!(err, InstallerError::InvalidVersion { ref version, .. } if version == "latest"));
}

#[test]
fn unreadable_manifest_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");
    let err = read_version(&path).unwrap_err();
    assert!(matches!(err, InstallerError::ManifestAccess { .. }));
    assert!(err.to_string().contains("missing.toml"));
}
