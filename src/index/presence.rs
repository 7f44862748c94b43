// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Token membership without counts or ranking.
//!
//! One empty-valued key per (term, document) pair: `term ‖ 0x00 ‖ document`.
//! A search is one prefix scan over the query string taken as a single term,
//! returning documents in key order.

use tracing::{debug, info};

use super::Index;
use crate::codec::keys;
use crate::error::{Error, Result};
use crate::store::KvStore;
use crate::tokenize::tokenize;

#[derive(Debug)]
pub struct PresenceIndex<S: KvStore> {
    store: Option<S>,
}

impl<S: KvStore> PresenceIndex<S> {
    pub fn open(store: S) -> Result<Self> {
        info!("opened presence index");
        Ok(Self { store: Some(store) })
    }

    fn store(&self) -> Result<&S> {
        self.store.as_ref().ok_or(Error::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.store.is_none()
    }
}

impl<S: KvStore> Index for PresenceIndex<S> {
    fn add(&mut self, document: &str, text: &str) -> Result<()> {
        let store = self.store()?;
        let mut written = 0;
        for term in tokenize(text) {
            let key = keys::encode(term.as_bytes(), document.as_bytes());
            if !store.has(&key)? {
                store.put(&key, &[])?;
                written += 1;
            }
        }
        debug!(document, written, "indexed document");
        Ok(())
    }

    fn search(&self, query: &str) -> Result<Vec<String>> {
        let store = self.store()?;
        let mut documents = Vec::new();
        store.scan_prefix(&keys::prefix_for(query.as_bytes()), &mut |key, _| {
            let (_, document) = keys::decode(key)?;
            documents.push(keys::utf8(key, document)?.to_string());
            Ok(())
        })?;
        Ok(documents)
    }

    fn close(&mut self) -> Result<()> {
        let store = self.store.take().ok_or(Error::Closed)?;
        store.flush()?;
        info!("closed presence index");
        Ok(())
    }
}
