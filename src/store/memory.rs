// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory ordered store.
//!
//! A `BTreeMap` already iterates in byte-lexicographic key order, so prefix
//! scans are a range query that stops at the first key without the prefix.
//! Clones share the same map: dropping an index and opening a new one over a
//! clone behaves like closing and reopening a database directory.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{KvStore, Visit};
use crate::error::Result;

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    map: Arc<RwLock<BTreeMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.map.read().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.map.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn has(&self, key: &[u8]) -> Result<bool> {
        Ok(self.map.read().contains_key(key))
    }

    fn scan_prefix(&self, prefix: &[u8], visit: &mut Visit<'_>) -> Result<()> {
        // Snapshot the matching range so `visit` may call back into the store.
        let entries: Vec<(Vec<u8>, Vec<u8>)> = {
            let map = self.map.read();
            map.range::<[u8], _>((Bound::Included(prefix), Bound::Unbounded))
                .take_while(|(key, _)| key.starts_with(prefix))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        };

        for (key, value) in &entries {
            visit(key, value)?;
        }
        Ok(())
    }
}
