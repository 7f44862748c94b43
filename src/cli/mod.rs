// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the tallydex command-line interface.
//!
//! Every subcommand works on one on-disk index directory, chosen with
//! `--index` or `TALLYDEX_INDEX`. `index` bulk-loads a corpus directory, `add`
//! indexes a single document, `search` queries, and `inspect` and `verify`
//! look at what is stored.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tallydex::IndexKind;

#[derive(Parser)]
#[command(
    name = "tallydex",
    about = "Vector-space document retrieval over RocksDB",
    version
)]
pub struct Cli {
    /// Index directory (created on first use)
    #[arg(long, global = true, env = "TALLYDEX_INDEX", default_value = ".tallydex")]
    pub index: PathBuf,

    /// Index implementation, overriding the config file
    #[arg(long, global = true, value_enum)]
    pub kind: Option<KindArg>,

    /// JSON configuration file
    #[arg(long, global = true, env = "TALLYDEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug diagnostics to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Vector,
    Presence,
}

impl From<KindArg> for IndexKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Vector => IndexKind::Vector,
            KindArg::Presence => IndexKind::Presence,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Index every document of a corpus directory
    ///
    /// Uses `manifest.json` in the directory when present, otherwise every
    /// regular file in it, named by file name.
    Index {
        /// Corpus directory
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Index one document
    Add {
        /// Document name
        name: String,

        /// File holding the document text, `-` or absent for stdin
        file: Option<PathBuf>,
    },

    /// Search the index and print matching documents
    Search {
        /// Search query
        query: String,

        /// Maximum number of results to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print similarity scores (vector indexes only)
        #[arg(long)]
        scores: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show corpus statistics and the most frequent terms (vector indexes only)
    Inspect {
        /// Number of terms to list
        #[arg(long, default_value = "10")]
        top: usize,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the counter invariants of a vector index
    Verify {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
