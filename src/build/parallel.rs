// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel document loading.
//!
//! Reading a corpus from disk is embarrassingly parallel, indexing it is not:
//! adds take `&mut` on the index. So files are read with `par_iter()` and the
//! results come back in manifest order for a single sequential indexing pass.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs;
use std::path::Path;

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;

use super::{Document, DocumentEntry};
use crate::error::{Error, Result};

fn load_one(base: &Path, entry: &DocumentEntry) -> Result<Document> {
    let path = base.join(&entry.path);
    let text = fs::read_to_string(&path).map_err(|source| Error::Load { path, source })?;
    Ok(Document {
        name: entry.name.clone(),
        text,
    })
}

/// Load every entry relative to `base`, preserving entry order.
#[cfg(feature = "parallel")]
pub fn load_documents_with_progress(
    base: &Path,
    entries: &[DocumentEntry],
    progress: &ProgressBar,
) -> Result<Vec<Document>> {
    entries
        .par_iter()
        .map(|entry| {
            let doc = load_one(base, entry);
            progress.inc(1);
            doc
        })
        .collect()
}

/// Load every entry relative to `base`, preserving entry order.
#[cfg(not(feature = "parallel"))]
pub fn load_documents_with_progress(
    base: &Path,
    entries: &[DocumentEntry],
) -> Result<Vec<Document>> {
    entries.iter().map(|entry| load_one(base, entry)).collect()
}
