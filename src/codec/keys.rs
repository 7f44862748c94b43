// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Compound keys: `first ‖ 0x00 ‖ second`.
//!
//! The separator must not occur inside either component. That is a caller
//! precondition: nothing rejects it at write time, and a violating key only
//! shows up later as a lookup that lands on the wrong pair or as a
//! [`Corruption::MissingSeparator`] during a scan.
//!
//! # Key families
//!
//! | Family | Layout | Value |
//! |--------|--------|-------|
//! | document-term | `"ft" ‖ document ‖ 0x00 ‖ term` | 4-byte count |
//! | corpus | `"df" ‖ term` | 4-byte count |
//! | term-document | `"tf" ‖ term ‖ 0x00 ‖ document` | 4-byte count |
//!
//! The family tags are two bytes wide and distinct, so a scan over one family
//! never sees another family's keys.

use crate::error::Corruption;

/// The reserved byte between the two components of a compound key.
pub const SEPARATOR: u8 = 0;

/// Family tag: occurrences of a term within one document, keyed document first.
pub const DOC_TERM: &[u8] = b"ft";

/// Family tag: occurrences of a term across the whole corpus.
pub const CORPUS: &[u8] = b"df";

/// Family tag: occurrences of a term within one document, keyed term first.
pub const TERM_DOC: &[u8] = b"tf";

/// `a ‖ SEP ‖ b`.
pub fn encode(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(a.len() + 1 + b.len());
    key.extend_from_slice(a);
    key.push(SEPARATOR);
    key.extend_from_slice(b);
    key
}

/// Split at the first separator.
pub fn decode(key: &[u8]) -> Result<(&[u8], &[u8]), Corruption> {
    match key.iter().position(|&byte| byte == SEPARATOR) {
        Some(idx) => Ok((&key[..idx], &key[idx + 1..])),
        None => Err(Corruption::MissingSeparator { key: key.to_vec() }),
    }
}

/// `a ‖ SEP`: scopes a scan to every pair whose first component is `a`.
pub fn prefix_for(a: &[u8]) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(a.len() + 1);
    prefix.extend_from_slice(a);
    prefix.push(SEPARATOR);
    prefix
}

fn tagged(tag: &[u8], rest: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(tag.len() + rest.len());
    key.extend_from_slice(tag);
    key.extend_from_slice(rest);
    key
}

pub fn doc_term_key(document: &str, term: &str) -> Vec<u8> {
    tagged(DOC_TERM, &encode(document.as_bytes(), term.as_bytes()))
}

pub fn corpus_key(term: &str) -> Vec<u8> {
    tagged(CORPUS, term.as_bytes())
}

pub fn term_doc_key(term: &str, document: &str) -> Vec<u8> {
    tagged(TERM_DOC, &encode(term.as_bytes(), document.as_bytes()))
}

/// Prefix of every document-term key for `document`.
pub fn doc_terms_prefix(document: &str) -> Vec<u8> {
    tagged(DOC_TERM, &prefix_for(document.as_bytes()))
}

/// Prefix of every term-document key for `term`.
pub fn term_docs_prefix(term: &str) -> Vec<u8> {
    tagged(TERM_DOC, &prefix_for(term.as_bytes()))
}

/// Strip a family tag and split the remainder into its two components.
pub fn decode_pair<'k>(tag: &[u8], key: &'k [u8]) -> Result<(&'k [u8], &'k [u8]), Corruption> {
    let body = key
        .strip_prefix(tag)
        .ok_or_else(|| Corruption::MissingSeparator { key: key.to_vec() })?;
    decode(body)
}

/// Interpret a key component as UTF-8, blaming `key` when it is not.
pub fn utf8<'a>(key: &[u8], component: &'a [u8]) -> Result<&'a str, Corruption> {
    std::str::from_utf8(component).map_err(|_| Corruption::InvalidUtf8 {
        key: key.to_vec(),
    })
}
