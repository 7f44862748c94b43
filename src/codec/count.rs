// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Counter values: unsigned 32-bit, big-endian, exactly four bytes.
//!
//! No varints here. A fixed width makes a corrupt value easy to spot (wrong
//! length) and keeps every counter rewrite the same size.

use crate::error::Corruption;

/// Width of every persisted counter value.
pub const COUNT_WIDTH: usize = 4;

pub fn encode_count(value: u32) -> [u8; COUNT_WIDTH] {
    value.to_be_bytes()
}

/// Decode the counter stored at `key`.
pub fn decode_count(key: &[u8], value: &[u8]) -> Result<u32, Corruption> {
    let bytes: [u8; COUNT_WIDTH] = value.try_into().map_err(|_| Corruption::CounterWidth {
        key: key.to_vec(),
        len: value.len(),
    })?;
    Ok(u32::from_be_bytes(bytes))
}
