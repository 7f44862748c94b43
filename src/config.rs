// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index configuration.
//!
//! Everything has a default, so an empty JSON object (or no file at all) is a
//! valid configuration. The CLI layers its flags on top of whatever the file says.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Which index implementation sits on top of the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Ranked vector-space retrieval.
    #[default]
    Vector,
    /// Token membership only, no ranking.
    Presence,
}

/// Storage backend options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    /// Create the database directory when it does not exist.
    pub create_if_missing: bool,
    /// Upper bound on open table files, `None` for the backend default.
    pub max_open_files: Option<i32>,
    /// fsync every write.
    pub sync_writes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            max_open_files: None,
            sync_writes: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexConfig {
    pub kind: IndexKind,
    pub store: StoreConfig,
}

impl IndexConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("invalid config JSON: {}", e)))
    }

    /// Read and parse a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
