// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ranked retrieval over persisted term counters.
//!
//! Documents and queries are vectors with one dimension per term. Indexing a
//! document maintains three counter families per token:
//!
//! ```text
//! "ft" ‖ document ‖ 0 ‖ term   occurrences of term in document
//! "df" ‖ term                  occurrences of term in the whole corpus
//! "tf" ‖ term ‖ 0 ‖ document   same count as "ft", keyed term first
//! ```
//!
//! Searching scans the `"tf"` family for every query term to find candidate
//! documents, then scores each candidate against the query (see
//! [`crate::scoring`]) and sorts.
//!
//! INVARIANT: for every document d and term t, `ft(d, t) == tf(t, d)`.
//! INVARIANT: for every term t, `df(t) == Σ_d ft(d, t)`.
//!
//! Both only hold between adds. An add that fails partway leaves the counters
//! for earlier tokens written and can break the first one for the failing token.

use std::collections::BTreeSet;
#[cfg(feature = "rocksdb")]
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use super::cache::CorpusCounts;
use super::verify::{self, VerificationReport};
use super::Index;
use crate::codec::{decode_count, keys};
#[cfg(feature = "rocksdb")]
use crate::config::StoreConfig;
use crate::counter;
use crate::error::{Corruption, Error, Result};
use crate::scoring::{rank, similarity, ScoredDocument, TermVector};
#[cfg(feature = "rocksdb")]
use crate::store::RocksStore;
use crate::store::KvStore;
use crate::tokenize::{term_counts, tokenize, unique_terms};

/// Corpus-level numbers for `inspect`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Distinct document names.
    pub documents: usize,
    /// Distinct terms.
    pub terms: usize,
    /// Token occurrences across all documents.
    pub tokens: u64,
}

#[derive(Debug)]
pub struct VectorIndex<S: KvStore> {
    /// `None` once closed.
    store: Option<S>,
    corpus: CorpusCounts,
}

impl<S: KvStore> VectorIndex<S> {
    /// Open an index over `store`, loading the corpus counts into memory.
    pub fn open(store: S) -> Result<Self> {
        let corpus = CorpusCounts::load(&store)?;
        info!(terms = corpus.len(), "opened vector index");
        Ok(Self {
            store: Some(store),
            corpus,
        })
    }

    fn store(&self) -> Result<&S> {
        self.store.as_ref().ok_or(Error::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.store.is_none()
    }

    /// The in-memory corpus counts.
    pub fn corpus_counts(&self) -> Result<&CorpusCounts> {
        self.store()?;
        Ok(&self.corpus)
    }

    /// Persisted occurrences of `term` in `document` (document-first key).
    pub fn doc_term_count(&self, document: &str, term: &str) -> Result<u32> {
        counter::read(self.store()?, &keys::doc_term_key(document, term))
    }

    /// Persisted occurrences of `term` in `document` (term-first key).
    pub fn term_doc_count(&self, term: &str, document: &str) -> Result<u32> {
        counter::read(self.store()?, &keys::term_doc_key(term, document))
    }

    /// Persisted corpus-wide occurrences of `term`.
    pub fn corpus_count(&self, term: &str) -> Result<u32> {
        counter::read(self.store()?, &keys::corpus_key(term))
    }

    /// Weights `ft(d, t) / df(t)` for every term of `document`.
    pub fn document_vector(&self, document: &str) -> Result<TermVector> {
        let store = self.store()?;
        let prefix = keys::doc_terms_prefix(document);
        let mut vector = TermVector::new();

        store.scan_prefix(&prefix, &mut |key, value| {
            let term = keys::utf8(key, &key[prefix.len()..])?;
            let count = decode_count(key, value)?;
            if count == 0 {
                return Ok(());
            }
            let corpus_count = self
                .corpus
                .get(term)
                .filter(|&c| c > 0)
                .ok_or_else(|| Corruption::MissingCorpusCount {
                    term: term.to_string(),
                })?;
            vector.insert_ratio(term, count, corpus_count);
            Ok(())
        })?;

        Ok(vector)
    }

    /// Weights `qtf(t) / df(t)` for every query term the corpus has seen.
    /// Unknown terms are left out.
    pub fn query_vector(&self, query: &str) -> Result<TermVector> {
        self.store()?;
        let mut vector = TermVector::new();
        for (term, count) in term_counts(query) {
            if let Some(corpus_count) = self.corpus.get(term) {
                vector.insert_ratio(term, count, corpus_count);
            }
        }
        Ok(vector)
    }

    /// Every document containing at least one query term, in name order.
    pub fn candidates(&self, query: &str) -> Result<BTreeSet<String>> {
        let store = self.store()?;
        let mut candidates = BTreeSet::new();

        for term in unique_terms(query) {
            store.scan_prefix(&keys::term_docs_prefix(term), &mut |key, _| {
                let (_, document) = keys::decode_pair(keys::TERM_DOC, key)?;
                let document = keys::utf8(key, document)?;
                if !candidates.contains(document) {
                    candidates.insert(document.to_string());
                }
                Ok(())
            })?;
        }

        Ok(candidates)
    }

    /// Candidates with their scores, best first.
    pub fn search_scored(&self, query: &str) -> Result<Vec<ScoredDocument>> {
        let candidates = self.candidates(query)?;
        let query_vector = self.query_vector(query)?;
        let scored = self.score_candidates(&query_vector, candidates)?;
        debug!(query, candidates = scored.len(), "scored candidates");
        Ok(rank(scored))
    }

    #[cfg(feature = "parallel")]
    fn score_candidates(
        &self,
        query_vector: &TermVector,
        candidates: BTreeSet<String>,
    ) -> Result<Vec<ScoredDocument>> {
        candidates
            .into_iter()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|name| self.score_one(query_vector, name))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn score_candidates(
        &self,
        query_vector: &TermVector,
        candidates: BTreeSet<String>,
    ) -> Result<Vec<ScoredDocument>> {
        candidates
            .into_iter()
            .map(|name| self.score_one(query_vector, name))
            .collect()
    }

    fn score_one(&self, query_vector: &TermVector, name: String) -> Result<ScoredDocument> {
        let document_vector = self.document_vector(&name)?;
        let score = similarity(query_vector, &document_vector);
        Ok(ScoredDocument::new(name, score))
    }

    /// Names of all indexed documents, in name order.
    pub fn document_names(&self) -> Result<Vec<String>> {
        let store = self.store()?;
        let mut names: Vec<String> = Vec::new();
        store.scan_prefix(keys::DOC_TERM, &mut |key, _| {
            let (document, _) = keys::decode_pair(keys::DOC_TERM, key)?;
            let document = keys::utf8(key, document)?;
            // Keys for one document are contiguous.
            if names.last().map(String::as_str) != Some(document) {
                names.push(document.to_string());
            }
            Ok(())
        })?;
        Ok(names)
    }

    pub fn stats(&self) -> Result<IndexStats> {
        Ok(IndexStats {
            documents: self.document_names()?.len(),
            terms: self.corpus.len(),
            tokens: self.corpus.total(),
        })
    }

    /// Check every counter invariant against the persisted data.
    pub fn verify(&self) -> Result<VerificationReport> {
        verify::verify(self.store()?, &self.corpus)
    }
}

#[cfg(feature = "rocksdb")]
impl VectorIndex<RocksStore> {
    /// Open a RocksDB-backed index in directory `path`.
    pub fn open_path(path: impl AsRef<Path>, config: &StoreConfig) -> Result<Self> {
        Self::open(RocksStore::open(path, config)?)
    }
}

impl<S: KvStore> Index for VectorIndex<S> {
    fn add(&mut self, document: &str, text: &str) -> Result<()> {
        let store = self.store.as_ref().ok_or(Error::Closed)?;
        let tokens = tokenize(text);

        for term in &tokens {
            counter::increment(store, &keys::doc_term_key(document, term))?;
            counter::increment(store, &keys::corpus_key(term))?;
            self.corpus.bump(term);
            counter::increment(store, &keys::term_doc_key(term, document))?;
        }

        debug!(document, tokens = tokens.len(), "indexed document");
        Ok(())
    }

    fn search(&self, query: &str) -> Result<Vec<String>> {
        Ok(self
            .search_scored(query)?
            .into_iter()
            .map(|scored| scored.name)
            .collect())
    }

    fn close(&mut self) -> Result<()> {
        let store = self.store.take().ok_or(Error::Closed)?;
        self.corpus.clear();
        store.flush()?;
        info!("closed vector index");
        Ok(())
    }
}
