// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bulk indexing from a corpus directory.
//!
//! A corpus is either described by a `manifest.json` at its root or, without
//! one, is every regular file directly inside the directory in name order.
//! Files are loaded in parallel and then added to the index one at a time.

pub mod manifest;
pub mod parallel;

use std::fs;
use std::path::Path;

#[cfg(feature = "parallel")]
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::index::Index;

pub use manifest::*;
pub use parallel::*;

const MANIFEST_FILE: &str = "manifest.json";

/// A named document ready to be indexed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

/// Entries for `dir`: from its manifest when present, else its regular files.
pub fn discover(dir: &Path) -> Result<Vec<DocumentEntry>> {
    let manifest_path = dir.join(MANIFEST_FILE);
    if manifest_path.is_file() {
        let json = fs::read_to_string(&manifest_path).map_err(|source| Error::Load {
            path: manifest_path.clone(),
            source,
        })?;
        let entries = CorpusManifest::parse(&json)?.entries()?;
        info!(documents = entries.len(), "read corpus manifest");
        return Ok(entries);
    }

    let mut entries = Vec::new();
    for dirent in fs::read_dir(dir)? {
        let dirent = dirent?;
        if !dirent.file_type()?.is_file() {
            continue;
        }
        let file_name = dirent.file_name();
        let Some(name) = file_name.to_str() else {
            warn!(file = ?file_name, "skipping file with a non-UTF-8 name");
            continue;
        };
        entries.push(DocumentEntry {
            name: name.to_string(),
            path: name.to_string(),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

#[cfg(feature = "parallel")]
fn styled_bar(len: usize, prefix: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(create_progress_style());
    pb.set_prefix(prefix);
    pb
}

/// Discover and read every document of the corpus at `dir`.
pub fn load_corpus(dir: &Path) -> Result<Vec<Document>> {
    let entries = discover(dir)?;
    #[cfg(feature = "parallel")]
    let load_pb = styled_bar(entries.len(), "Loading");
    load_entries(
        dir,
        &entries,
        #[cfg(feature = "parallel")]
        &load_pb,
    )
}

fn load_entries(
    dir: &Path,
    entries: &[DocumentEntry],
    #[cfg(feature = "parallel")] load_pb: &ProgressBar,
) -> Result<Vec<Document>> {
    let documents = parallel::load_documents_with_progress(
        dir,
        entries,
        #[cfg(feature = "parallel")]
        load_pb,
    )?;
    #[cfg(feature = "parallel")]
    load_pb.finish_with_message(format!("loaded {} documents", documents.len()));
    info!(documents = documents.len(), dir = %dir.display(), "loaded corpus");
    Ok(documents)
}

/// Add `documents` to `index` in order, stopping at the first failure.
///
/// Returns the number of documents added. Documents before a failure stay
/// indexed.
pub fn index_corpus<I: Index + ?Sized>(
    index: &mut I,
    documents: &[Document],
) -> Result<usize> {
    #[cfg(feature = "parallel")]
    let index_pb = styled_bar(documents.len(), "Indexing");
    add_documents(
        index,
        documents,
        #[cfg(feature = "parallel")]
        &index_pb,
    )
}

fn add_documents<I: Index + ?Sized>(
    index: &mut I,
    documents: &[Document],
    #[cfg(feature = "parallel")] index_pb: &ProgressBar,
) -> Result<usize> {
    for doc in documents {
        #[cfg(feature = "parallel")]
        index_pb.set_message(doc.name.clone());
        index.add(&doc.name, &doc.text)?;
        #[cfg(feature = "parallel")]
        index_pb.inc(1);
    }
    #[cfg(feature = "parallel")]
    index_pb.finish_with_message(format!("indexed {} documents", documents.len()));
    Ok(documents.len())
}

/// Load the corpus at `dir` and index it, showing the loading and indexing
/// progress bars together.
pub fn build_corpus<I: Index + ?Sized>(index: &mut I, dir: &Path) -> Result<usize> {
    let entries = discover(dir)?;

    #[cfg(feature = "parallel")]
    let multi = MultiProgress::new();
    #[cfg(feature = "parallel")]
    let load_pb = multi.add(styled_bar(entries.len(), "Loading"));

    let documents = load_entries(
        dir,
        &entries,
        #[cfg(feature = "parallel")]
        &load_pb,
    )?;
    if documents.is_empty() {
        warn!(dir = %dir.display(), "no documents found; nothing to index");
        return Ok(0);
    }

    #[cfg(feature = "parallel")]
    let index_pb = multi.add(styled_bar(documents.len(), "Indexing"));

    add_documents(
        index,
        &documents,
        #[cfg(feature = "parallel")]
        &index_pb,
    )
}
