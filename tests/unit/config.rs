//! Configuration loading from disk.

use std::fs;

use tallydex::{Error, IndexConfig, IndexKind};

#[test]
fn test_config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tallydex.json");
    fs::write(
        &path,
        r#"{"kind": "presence", "store": {"syncWrites": true, "maxOpenFiles": 64}}"#,
    )
    .unwrap();

    let config = IndexConfig::from_file(&path).unwrap();
    assert_eq!(config.kind, IndexKind::Presence);
    assert!(config.store.sync_writes);
    assert!(config.store.create_if_missing);
    assert_eq!(config.store.max_open_files, Some(64));
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = IndexConfig::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_malformed_config_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"kind": "fuzzy"}"#).unwrap();
    assert!(matches!(IndexConfig::from_file(&path), Err(Error::Config(_))));
}
