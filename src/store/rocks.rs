// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! RocksDB-backed store.
//!
//! RocksDB's default comparator is bytewise, which is exactly the key order the
//! indexes rely on. Prefix scans seek to the prefix and walk forward until the
//! first key that no longer starts with it; no prefix extractor is configured.

use std::path::{Path, PathBuf};

use rocksdb::{Direction, IteratorMode, Options, WriteOptions, DB};
use tracing::debug;

use super::{KvStore, Visit};
use crate::config::StoreConfig;
use crate::error::{Error, Result};

pub struct RocksStore {
    db: DB,
    path: PathBuf,
    sync_writes: bool,
}

impl RocksStore {
    /// Open (or create, per `config`) the database in directory `path`.
    pub fn open(path: impl AsRef<Path>, config: &StoreConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut opts = Options::default();
        opts.create_if_missing(config.create_if_missing);
        if let Some(max_open_files) = config.max_open_files {
            opts.set_max_open_files(max_open_files);
        }

        let db = DB::open(&opts, &path).map_err(Error::store)?;
        debug!(path = %path.display(), "opened rocksdb store");

        Ok(Self {
            db,
            path,
            sync_writes: config.sync_writes,
        })
    }

    /// Directory the database lives in.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KvStore for RocksStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.db.get(key).map_err(Error::store)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.sync_writes);
        self.db.put_opt(key, value, &write_opts).map_err(Error::store)
    }

    fn scan_prefix(&self, prefix: &[u8], visit: &mut Visit<'_>) -> Result<()> {
        let iter = self
            .db
            .iterator(IteratorMode::From(prefix, Direction::Forward));
        for item in iter {
            let (key, value) = item.map_err(Error::store)?;
            if !key.starts_with(prefix) {
                break;
            }
            visit(&key, &value)?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.db.flush().map_err(Error::store)
    }
}
