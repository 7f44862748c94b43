// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Whitespace tokenization.
//!
//! Text splits on runs of ASCII whitespace (space, `\t`, `\n`, `\x0C`, `\r`).
//! A run counts once, however long it is. Leading or trailing whitespace
//! produces an empty token at that end, and the empty string produces exactly
//! one empty token. Empty tokens are real terms: they get indexed and counted
//! like any other.
//!
//! No lowercasing, stemming or stop words. The same bytes in, the same terms out.

use std::collections::{BTreeSet, HashMap};

/// Split `text` into terms, in order, keeping repeats.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_run = false;

    for (idx, ch) in text.char_indices() {
        if ch.is_ascii_whitespace() {
            if !in_run {
                tokens.push(&text[start..idx]);
                in_run = true;
            }
        } else if in_run {
            start = idx;
            in_run = false;
        }
    }

    tokens.push(if in_run { "" } else { &text[start..] });
    tokens
}

/// Distinct terms of `text`, in ascending order.
pub fn unique_terms(text: &str) -> BTreeSet<&str> {
    tokenize(text).into_iter().collect()
}

/// Occurrences of each term in `text`.
pub fn term_counts(text: &str) -> HashMap<&str, u32> {
    let mut counts = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}
