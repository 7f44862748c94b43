// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Offline consistency check for the counter families.
//!
//! Adds are not atomic, so a crash or an overflow midway through one can leave
//! the families disagreeing. This walks all three families and the in-memory
//! mirror and reports every disagreement it finds. It reads every counter into
//! memory, so it is meant for maintenance, not for the query path.
//!
//! Nothing is repaired. Rebuilding the index from its sources is the fix.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::cache::CorpusCounts;
use crate::codec::{decode_count, keys};
use crate::error::Result;
use crate::store::KvStore;

/// One broken invariant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Violation {
    /// `ft(document, term) != tf(term, document)`.
    #[serde(rename_all = "camelCase")]
    PairMismatch {
        document: String,
        term: String,
        doc_term: u32,
        term_doc: u32,
    },
    /// `df(term) != Σ_d ft(d, term)`.
    #[serde(rename_all = "camelCase")]
    CorpusMismatch {
        term: String,
        persisted: u32,
        summed: u64,
    },
    /// The in-memory mirror disagrees with the persisted corpus counter.
    #[serde(rename_all = "camelCase")]
    CacheMismatch {
        term: String,
        cached: Option<u32>,
        persisted: u32,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::PairMismatch {
                document,
                term,
                doc_term,
                term_doc,
            } => write!(
                f,
                "document {:?} term {:?}: ft={} but tf={}",
                document, term, doc_term, term_doc
            ),
            Violation::CorpusMismatch {
                term,
                persisted,
                summed,
            } => write!(
                f,
                "term {:?}: df={} but document counts sum to {}",
                term, persisted, summed
            ),
            Violation::CacheMismatch {
                term,
                cached,
                persisted,
            } => match cached {
                Some(cached) => write!(
                    f,
                    "term {:?}: cached {} but df={}",
                    term, cached, persisted
                ),
                None => write!(f, "term {:?}: not cached but df={}", term, persisted),
            },
        }
    }
}

/// Outcome of [`verify`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    /// Distinct (document, term) pairs across both pair families.
    pub pairs_checked: usize,
    /// Distinct terms across all families and the mirror.
    pub terms_checked: usize,
    pub violations: Vec<Violation>,
}

impl VerificationReport {
    pub fn is_consistent(&self) -> bool {
        self.violations.is_empty()
    }
}

type PairCounts = BTreeMap<(String, String), u32>;

/// Read one pair family into `(document, term) -> count`.
fn load_pairs<S: KvStore + ?Sized>(
    store: &S,
    tag: &[u8],
    document_first: bool,
) -> Result<PairCounts> {
    let mut pairs = PairCounts::new();
    store.scan_prefix(tag, &mut |key, value| {
        let (first, second) = keys::decode_pair(tag, key)?;
        let first = keys::utf8(key, first)?.to_string();
        let second = keys::utf8(key, second)?.to_string();
        let count = decode_count(key, value)?;
        let pair = if document_first {
            (first, second)
        } else {
            (second, first)
        };
        pairs.insert(pair, count);
        Ok(())
    })?;
    Ok(pairs)
}

/// Check FT == TF per pair, DF == ΣFT per term, and mirror == DF per term.
pub fn verify<S: KvStore + ?Sized>(store: &S, cache: &CorpusCounts) -> Result<VerificationReport> {
    let doc_terms = load_pairs(store, keys::DOC_TERM, true)?;
    let term_docs = load_pairs(store, keys::TERM_DOC, false)?;

    let mut persisted: BTreeMap<String, u32> = BTreeMap::new();
    store.scan_prefix(keys::CORPUS, &mut |key, value| {
        let term = keys::utf8(key, &key[keys::CORPUS.len()..])?;
        persisted.insert(term.to_string(), decode_count(key, value)?);
        Ok(())
    })?;

    let mut violations = Vec::new();

    let mut pairs: Vec<&(String, String)> = doc_terms.keys().chain(term_docs.keys()).collect();
    pairs.sort();
    pairs.dedup();
    for pair in &pairs {
        let doc_term = doc_terms.get(*pair).copied().unwrap_or(0);
        let term_doc = term_docs.get(*pair).copied().unwrap_or(0);
        if doc_term != term_doc {
            violations.push(Violation::PairMismatch {
                document: pair.0.clone(),
                term: pair.1.clone(),
                doc_term,
                term_doc,
            });
        }
    }

    let mut summed: BTreeMap<&str, u64> = BTreeMap::new();
    for ((_, term), &count) in &doc_terms {
        *summed.entry(term.as_str()).or_insert(0) += u64::from(count);
    }

    let mut terms: Vec<&str> = persisted
        .keys()
        .map(String::as_str)
        .chain(summed.keys().copied())
        .chain(cache.iter().map(|(term, _)| term))
        .collect();
    terms.sort_unstable();
    terms.dedup();

    for &term in &terms {
        let df = persisted.get(term).copied().unwrap_or(0);
        let sum = summed.get(term).copied().unwrap_or(0);
        if u64::from(df) != sum {
            violations.push(Violation::CorpusMismatch {
                term: term.to_string(),
                persisted: df,
                summed: sum,
            });
        }
        let cached = cache.get(term);
        if cached.unwrap_or(0) != df {
            violations.push(Violation::CacheMismatch {
                term: term.to_string(),
                cached,
                persisted: df,
            });
        }
    }

    Ok(VerificationReport {
        pairs_checked: pairs.len(),
        terms_checked: terms.len(),
        violations,
    })
}
