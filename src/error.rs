// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors for indexing and retrieval.
//!
//! Three kinds matter to callers: the store failed (`Store`), the persisted data
//! does not decode (`CorruptIndex`), or a counter is full (`Overflow`). None of
//! them is retried or repaired here. Corruption is only ever noticed when the
//! bad key or value is read back, never when it is written.

use thiserror::Error;

/// Why a persisted key or value could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Corruption {
    /// A counter value that is not exactly four bytes wide.
    #[error("key \"{}\" holds a {}-byte value, expected 4", .key.escape_ascii(), .len)]
    CounterWidth { key: Vec<u8>, len: usize },

    /// A compound key without the separator byte.
    #[error("invalid key format: \"{}\"; possible index corruption?", .key.escape_ascii())]
    MissingSeparator { key: Vec<u8> },

    /// A stored term or document name that is not UTF-8.
    #[error("key \"{}\" contains a name that is not valid UTF-8", .key.escape_ascii())]
    InvalidUtf8 { key: Vec<u8> },

    /// A document references a term the corpus counts know nothing about.
    #[error("term {term:?} has a document count but no corpus count")]
    MissingCorpusCount { term: String },
}

/// Main error type for tallydex operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("corrupt index: {0}")]
    CorruptIndex(#[from] Corruption),

    #[error("counter at key \"{}\" is already at u32::MAX and cannot be incremented", .key.escape_ascii())]
    Overflow { key: Vec<u8> },

    #[error("index is closed")]
    Closed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read {}: {}", .path.display(), .source)]
    Load {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for tallydex operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a storage backend error.
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Store(Box::new(err))
    }

    /// True for errors that require repairing or rebuilding the index.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Error::CorruptIndex(_))
    }
}
