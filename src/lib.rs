// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Vector-space document retrieval over an ordered key-value store.
//!
//! Every document and query is a sparse vector with one dimension per term.
//! Indexing keeps three families of 4-byte counters in the store, and a search
//! ranks the documents that share a term with the query by cosine-style
//! similarity.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ tokenize.rs │────▶│ index/       │────▶│ scoring/     │
//! │ (terms)     │     │ (add, search)│     │ (similarity, │
//! └─────────────┘     └──────────────┘     │  rank)       │
//!                            │             └──────────────┘
//!                            ▼
//!               ┌────────────────────────┐
//!               │ counter.rs / codec/    │
//!               │ (keys, 4-byte counts)  │
//!               └────────────────────────┘
//!                            │
//!                            ▼
//!               ┌────────────────────────┐
//!               │ store/ (KvStore:       │
//!               │  memory, rocksdb)      │
//!               └────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use tallydex::{Index, MemoryStore, VectorIndex};
//!
//! let mut index = VectorIndex::open(MemoryStore::new())?;
//! index.add("a", "hello world")?;
//! index.add("b", "hello tiger")?;
//! index.add("c", "rumic world")?;
//!
//! assert_eq!(index.search("tiger")?, vec!["b"]);
//! index.close()?;
//! # Ok::<(), tallydex::Error>(())
//! ```

pub mod build;
pub mod codec;
pub mod config;
pub mod counter;
pub mod error;
pub mod index;
pub mod scoring;
pub mod store;
pub mod tokenize;

pub use config::{IndexConfig, IndexKind, StoreConfig};
pub use error::{Corruption, Error, Result};
pub use index::verify::{VerificationReport, Violation};
pub use index::{CorpusCounts, Index, IndexStats, PresenceIndex, VectorIndex};
pub use scoring::{similarity, ScoredDocument, TermVector};
#[cfg(feature = "rocksdb")]
pub use store::RocksStore;
pub use store::{KvStore, MemoryStore};
pub use tokenize::tokenize;
