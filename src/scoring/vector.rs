// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind the score.
//!
//! A term's weight is its occurrence count (in the document, or in the query)
//! divided by its occurrence count across the whole corpus. Rare terms weigh
//! more; a term that appears only in this one document weighs exactly its
//! in-document count.
//!
//! Similarity looks like cosine but is not:
//!
//! ```text
//! score(q, d) = dot(q, d) / (mag(q) * mag(d))
//! mag(v)      = Σ weight(t)²          (no square root)
//! ```
//!
//! Without the root the score is not bounded by 1, and it favours documents
//! whose own vector is small. Rankings are defined by this formula as written.

use std::collections::BTreeMap;

/// Sparse term → weight vector.
///
/// Ordered by term so sums always accumulate in the same order and a score
/// is reproducible to the last bit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TermVector {
    weights: BTreeMap<String, f64>,
}

impl TermVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight for `term`: `count / corpus_count`.
    pub fn insert_ratio(&mut self, term: impl Into<String>, count: u32, corpus_count: u32) {
        self.weights
            .insert(term.into(), f64::from(count) / f64::from(corpus_count));
    }

    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights
            .iter()
            .map(|(term, &weight)| (term.as_str(), weight))
    }

    /// Sum over shared terms of the product of weights.
    pub fn dot(&self, other: &TermVector) -> f64 {
        // Iterate the smaller side; terms missing from either contribute zero.
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .weights
            .iter()
            .filter_map(|(term, weight)| large.weights.get(term).map(|w| weight * w))
            .sum()
    }

    /// Sum of squared weights. Not square-rooted.
    pub fn magnitude(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum()
    }
}

impl FromIterator<(String, f64)> for TermVector {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}

/// `dot(q, d) / (mag(q) * mag(d))`, or `0.0` when either vector has no weight.
pub fn similarity(query: &TermVector, document: &TermVector) -> f64 {
    let denominator = query.magnitude() * document.magnitude();
    if denominator == 0.0 {
        return 0.0;
    }
    query.dot(document) / denominator
}
