// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! On-disk encoding: compound keys and fixed-width counters.
//!
//! Every byte the indexes persist goes through this module. Keeping the
//! counter codec in one place means the three counter families share one set
//! of corruption checks.

pub mod count;
pub mod keys;

pub use count::{decode_count, encode_count, COUNT_WIDTH};
pub use keys::{decode, encode, prefix_for, SEPARATOR};
