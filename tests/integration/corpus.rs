//! Bulk indexing from corpus directories.

use std::fs;

use tallydex::build::{index_corpus, load_corpus, Document};
use tallydex::{Error, Index};

use crate::common::vector_index_with;

#[test]
fn test_directory_corpus_is_searchable() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a"), "hello world").unwrap();
    fs::write(dir.path().join("b"), "hello tiger").unwrap();
    fs::write(dir.path().join("c"), "rumic world").unwrap();

    let docs = load_corpus(dir.path()).unwrap();
    let mut index = vector_index_with(&[]);
    assert_eq!(index_corpus(&mut index, &docs).unwrap(), 3);

    let mut results = index.search("world").unwrap();
    results.sort();
    assert_eq!(results, vec!["a", "c"]);
}

#[test]
fn test_manifest_names_documents() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("pages")).unwrap();
    fs::write(dir.path().join("pages").join("intro.txt"), "tiger tiger").unwrap();
    fs::write(
        dir.path().join("manifest.json"),
        r#"{"version": 1, "documents": [{"name": "intro", "path": "pages/intro.txt"}]}"#,
    )
    .unwrap();

    let docs = load_corpus(dir.path()).unwrap();
    assert_eq!(docs, vec![Document::new("intro", "tiger tiger")]);
}

#[test]
fn test_manifest_with_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("manifest.json"),
        r#"{"version": 1, "documents": ["missing.txt"]}"#,
    )
    .unwrap();
    assert!(matches!(load_corpus(dir.path()), Err(Error::Load { .. })));
}

#[test]
fn test_index_corpus_stops_at_closed_index() {
    let mut index = vector_index_with(&[]);
    index.close().unwrap();
    let docs = vec![Document::new("a", "hello")];
    assert!(matches!(index_corpus(&mut index, &docs), Err(Error::Closed)));
}
