// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The ordered key-value store the indexes are written against.
//!
//! Indexes only need four things from storage: point reads, point writes, an
//! existence check, and an ascending scan over every key sharing a prefix. Keys
//! compare byte-lexicographically. Anything that can do that can back an index,
//! which is how the tests run against [`MemoryStore`] while the CLI runs against
//! RocksDB.

mod memory;
#[cfg(feature = "rocksdb")]
mod rocks;

pub use memory::MemoryStore;
#[cfg(feature = "rocksdb")]
pub use rocks::RocksStore;

use crate::error::Result;

/// Callback for [`KvStore::scan_prefix`]. Returning an error stops the scan.
pub type Visit<'a> = dyn FnMut(&[u8], &[u8]) -> Result<()> + 'a;

/// Byte-keyed ordered storage.
pub trait KvStore: Send + Sync {
    /// Read the value stored at `key`, if any.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Store `value` at `key`, replacing any previous value.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Whether `key` is present.
    fn has(&self, key: &[u8]) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Visit every `(key, value)` whose key starts with `prefix`, in ascending
    /// key order. The first error, from the store or from `visit`, is returned.
    fn scan_prefix(&self, prefix: &[u8], visit: &mut Visit<'_>) -> Result<()>;

    /// Push buffered writes to durable storage.
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        (**self).put(key, value)
    }

    fn has(&self, key: &[u8]) -> Result<bool> {
        (**self).has(key)
    }

    fn scan_prefix(&self, prefix: &[u8], visit: &mut Visit<'_>) -> Result<()> {
        (**self).scan_prefix(prefix, visit)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        (**self).put(key, value)
    }

    fn has(&self, key: &[u8]) -> Result<bool> {
        (**self).has(key)
    }

    fn scan_prefix(&self, prefix: &[u8], visit: &mut Visit<'_>) -> Result<()> {
        (**self).scan_prefix(prefix, visit)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }
}
