// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index implementations and the contract they share.
//!
//! Two indexes sit on top of a [`KvStore`](crate::store::KvStore):
//!
//! - [`VectorIndex`]: per-term, per-document counters plus a corpus-count
//!   mirror, answering ranked queries.
//! - [`PresenceIndex`]: token membership only, answering unranked lookups.
//!
//! Both follow the same lifecycle. Open populates whatever in-memory state the
//! index needs; any number of adds and searches follow; close is terminal, and
//! every call after it (including a second close) fails with
//! [`Error::Closed`](crate::Error::Closed).
//!
//! Each index expects a store of its own. Their key layouts are not designed
//! to share one keyspace.

mod cache;
mod presence;
mod vector;
pub mod verify;

pub use cache::CorpusCounts;
pub use presence::PresenceIndex;
pub use vector::{IndexStats, VectorIndex};

use crate::error::Result;

/// Operations every index supports.
///
/// `add` takes `&mut self`: one writer at a time, checked by the compiler.
/// Searches only need `&self` and can share an index.
pub trait Index {
    /// Index `text` under the name `document`.
    ///
    /// Not atomic: if a term fails partway through, counters for the terms
    /// before it stay written.
    fn add(&mut self, document: &str, text: &str) -> Result<()>;

    /// Names of the documents matching `query`.
    fn search(&self, query: &str) -> Result<Vec<String>>;

    /// Flush and release the store.
    fn close(&mut self) -> Result<()>;
}

impl<I: Index + ?Sized> Index for Box<I> {
    fn add(&mut self, document: &str, text: &str) -> Result<()> {
        (**self).add(document, text)
    }

    fn search(&self, query: &str) -> Result<Vec<String>> {
        (**self).search(query)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
