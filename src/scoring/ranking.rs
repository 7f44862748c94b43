// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how scored candidates get sorted.
//!
//! Sort order:
//! 1. **Score** - descending, higher wins
//! 2. **Name** - ascending, so equal scores always come out in the same order
//!
//! Scores compare with `f64::total_cmp`, so even a NaN has a fixed place
//! instead of making the sort order depend on input order.

use std::cmp::Ordering;

use serde::Serialize;

/// A candidate document with its similarity to the query.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredDocument {
    pub name: String,
    pub score: f64,
}

impl ScoredDocument {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Compare two scored documents for ranking (`Less` = ranks first).
pub fn compare_scored(a: &ScoredDocument, b: &ScoredDocument) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.name.cmp(&b.name))
}

/// Sort in ranking order.
pub fn rank(mut scored: Vec<ScoredDocument>) -> Vec<ScoredDocument> {
    scored.sort_by(compare_scored);
    scored
}
