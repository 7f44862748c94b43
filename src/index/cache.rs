// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory mirror of the corpus counters.
//!
//! Every weight divides by a corpus count, so scoring would otherwise hit the
//! store once per term per candidate. The mirror is loaded once when the index
//! opens and then bumped alongside every persisted increment.
//!
//! INVARIANT: after every successful add, and right after open, each entry
//! equals the persisted `"df" ‖ term` counter.

use std::collections::HashMap;

use tracing::warn;

use crate::codec::{decode_count, keys};
use crate::error::Result;
use crate::store::KvStore;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorpusCounts {
    counts: HashMap<String, u32>,
}

impl CorpusCounts {
    /// Rebuild from every corpus counter in `store`.
    ///
    /// A value that is not four bytes wide aborts the load.
    pub fn load<S: KvStore + ?Sized>(store: &S) -> Result<Self> {
        let mut counts = HashMap::new();
        store.scan_prefix(keys::CORPUS, &mut |key, value| {
            let term = keys::utf8(key, &key[keys::CORPUS.len()..])?;
            let count = decode_count(key, value).map_err(|corruption| {
                warn!(%corruption, "corpus counter failed to decode");
                corruption
            })?;
            counts.insert(term.to_string(), count);
            Ok(())
        })?;
        Ok(Self { counts })
    }

    /// Corpus-wide occurrences of `term`, `None` if it was never indexed.
    pub fn get(&self, term: &str) -> Option<u32> {
        self.counts.get(term).copied()
    }

    /// Mirror one persisted increment.
    pub(crate) fn bump(&mut self, term: &str) {
        // Avoids allocating a key for terms already present.
        match self.counts.get_mut(term) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(term.to_string(), 1);
            }
        }
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(term, &count)| (term.as_str(), count))
    }

    /// Total occurrences of all terms.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&count| u64::from(count)).sum()
    }

    /// The `n` most frequent terms, most frequent first, ties by term.
    pub fn most_frequent(&self, n: usize) -> Vec<(&str, u32)> {
        let mut terms: Vec<(&str, u32)> = self.iter().collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(n);
        terms
    }

    pub(crate) fn clear(&mut self) {
        self.counts.clear();
    }
}

impl<'a> FromIterator<(&'a str, u32)> for CorpusCounts {
    fn from_iter<I: IntoIterator<Item = (&'a str, u32)>>(iter: I) -> Self {
        Self {
            counts: iter
                .into_iter()
                .map(|(term, count)| (term.to_string(), count))
                .collect(),
        }
    }
}
