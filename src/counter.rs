// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Read-modify-write counters on top of the store.
//!
//! There is no isolation between the read and the write. Two callers
//! incrementing the same key at once can lose an update; callers serialize.
//!
//! INVARIANT: a failed increment writes nothing.

use crate::codec::{decode_count, encode_count};
use crate::error::{Error, Result};
use crate::store::KvStore;

/// Read the counter at `key`, treating an absent key as zero.
pub fn read<S: KvStore + ?Sized>(store: &S, key: &[u8]) -> Result<u32> {
    match store.get(key)? {
        Some(value) => Ok(decode_count(key, &value)?),
        None => Ok(0),
    }
}

/// Add one to the counter at `key` and return the new value.
///
/// An absent key becomes 1. A counter already at `u32::MAX` fails with
/// [`Error::Overflow`] and is left as it was.
pub fn increment<S: KvStore + ?Sized>(store: &S, key: &[u8]) -> Result<u32> {
    let next = match store.get(key)? {
        None => 1,
        Some(value) => {
            let current = decode_count(key, &value)?;
            current
                .checked_add(1)
                .ok_or_else(|| Error::Overflow { key: key.to_vec() })?
        }
    };
    store.put(key, &encode_count(next))?;
    Ok(next)
}
