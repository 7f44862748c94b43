// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus manifest format.

use serde::Deserialize;

use crate::codec::SEPARATOR;
use crate::error::{Error, Result};

/// `manifest.json` at the root of a corpus directory.
#[derive(Deserialize, Clone, Debug)]
pub struct CorpusManifest {
    pub version: u32,
    pub documents: Vec<DocumentEntryValue>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum DocumentEntryValue {
    /// A path relative to the corpus directory, doubling as the document name.
    Path(String),
    /// An explicit name for the file at `path`.
    Named { name: String, path: String },
}

/// A document to load: its index name and where its text lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentEntry {
    pub name: String,
    pub path: String,
}

impl From<DocumentEntryValue> for DocumentEntry {
    fn from(val: DocumentEntryValue) -> Self {
        match val {
            DocumentEntryValue::Path(path) => DocumentEntry {
                name: path.clone(),
                path,
            },
            DocumentEntryValue::Named { name, path } => DocumentEntry { name, path },
        }
    }
}

impl CorpusManifest {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("invalid manifest JSON: {}", e)))
    }

    /// Normalized entries. A name containing the key separator is refused here,
    /// before it can reach the store.
    pub fn entries(&self) -> Result<Vec<DocumentEntry>> {
        self.documents
            .iter()
            .cloned()
            .map(DocumentEntry::from)
            .map(|entry| {
                if entry.name.as_bytes().contains(&SEPARATOR) {
                    Err(Error::Config(format!(
                        "document name {:?} contains a NUL byte",
                        entry.name
                    )))
                } else {
                    Ok(entry)
                }
            })
            .collect()
    }
}
