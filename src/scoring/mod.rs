// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how candidate documents get their order.
//!
//! Documents and queries become sparse weight vectors over terms. A document
//! scores by how strongly its vector agrees with the query's, and candidates
//! are sorted by that score with the document name as a deterministic tiebreaker.

pub mod ranking;
mod vector;

pub use ranking::{compare_scored, rank, ScoredDocument};
pub use vector::*;
