// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;

use tallydex::build;
use tallydex::{Index, IndexConfig, IndexKind, PresenceIndex, RocksStore, VectorIndex};

mod cli;
use cli::display::{self, row, section_bot, section_top, themed, BOLD, CYAN, GRAY};
use cli::{Cli, Commands};

/// The index selected by configuration, opened over RocksDB.
enum OpenIndex {
    Vector(VectorIndex<RocksStore>),
    Presence(PresenceIndex<RocksStore>),
}

impl OpenIndex {
    fn open(dir: &Path, config: &IndexConfig) -> Result<Self> {
        let store = RocksStore::open(dir, &config.store)
            .with_context(|| format!("failed to open index at {}", dir.display()))?;
        debug!(path = %store.path().display(), kind = ?config.kind, "opened store");
        Ok(match config.kind {
            IndexKind::Vector => OpenIndex::Vector(VectorIndex::open(store)?),
            IndexKind::Presence => OpenIndex::Presence(PresenceIndex::open(store)?),
        })
    }

    fn as_index_mut(&mut self) -> &mut dyn Index {
        match self {
            OpenIndex::Vector(index) => index,
            OpenIndex::Presence(index) => index,
        }
    }

    fn vector(&self, command: &str) -> Result<&VectorIndex<RocksStore>> {
        match self {
            OpenIndex::Vector(index) => Ok(index),
            OpenIndex::Presence(_) => bail!("`{}` needs a vector index", command),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<IndexConfig> {
    let mut config = match &cli.config {
        Some(path) => IndexConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => IndexConfig::default(),
    };
    if let Some(kind) = cli.kind {
        config.kind = kind.into();
    }
    Ok(config)
}

fn read_text(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read document from stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    debug!(?config, index = %cli.index.display(), "starting");
    let mut index = OpenIndex::open(&cli.index, &config)?;

    let outcome = run(&cli.command, &mut index);
    let closed = index.as_index_mut().close().context("failed to close index");
    outcome.and(closed)
}

fn run(command: &Commands, index: &mut OpenIndex) -> Result<()> {
    match command {
        Commands::Index { input } => {
            let added = build::build_corpus(index.as_index_mut(), input)
                .with_context(|| format!("failed to index corpus {}", input.display()))?;
            println!("{} {} documents", display::ok("indexed"), added);
        }

        Commands::Add { name, file } => {
            let text = read_text(file.as_deref())?;
            index
                .as_index_mut()
                .add(name, &text)
                .with_context(|| format!("failed to index {:?}", name))?;
            println!("{} {}", display::ok("indexed"), name);
        }

        Commands::Search {
            query,
            limit,
            scores,
            json,
        } => search(index, query, *limit, *scores, *json)?,

        Commands::Inspect { top, json } => inspect(index.vector("inspect")?, *top, *json)?,

        Commands::Verify { json } => {
            let report = index.vector("verify")?.verify()?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.is_consistent() {
                println!(
                    "{} {} pairs, {} terms",
                    display::ok("consistent:"),
                    report.pairs_checked,
                    report.terms_checked
                );
            } else {
                for violation in &report.violations {
                    println!("{} {}", display::problem("violation:"), violation);
                }
            }
            if !report.is_consistent() {
                bail!("{} counter invariant violations", report.violations.len());
            }
        }
    }
    Ok(())
}

fn search(
    index: &OpenIndex,
    query: &str,
    limit: Option<usize>,
    scores: bool,
    json: bool,
) -> Result<()> {
    let limit = limit.unwrap_or(usize::MAX);

    if !scores {
        let names: Vec<String> = match index {
            OpenIndex::Vector(index) => index.search(query)?,
            OpenIndex::Presence(index) => index.search(query)?,
        };
        let names: Vec<&String> = names.iter().take(limit).collect();
        if json {
            println!("{}", serde_json::to_string_pretty(&names)?);
        } else {
            for name in names {
                println!("{}", name);
            }
        }
        return Ok(());
    }

    let results = index.vector("search --scores")?.search_scored(query)?;
    let results: Vec<_> = results.into_iter().take(limit).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }
    let best = results.first().map_or(0.0, |r| r.score);
    for result in &results {
        let score = display::score_colored(result.score, best);
        println!("{}  {}", score, result.name);
    }
    Ok(())
}

fn inspect(index: &VectorIndex<RocksStore>, top: usize, json: bool) -> Result<()> {
    let stats = index.stats()?;
    let counts = index.corpus_counts()?;
    let frequent = counts.most_frequent(top);

    if json {
        let value = serde_json::json!({
            "stats": stats,
            "mostFrequent": frequent
                .iter()
                .map(|(term, count)| serde_json::json!({ "term": term, "count": count }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    section_top("INDEX");
    for (label, value) in [
        ("documents", stats.documents.to_string()),
        ("terms", stats.terms.to_string()),
        ("tokens", stats.tokens.to_string()),
    ] {
        let value = themed(CYAN, &[BOLD], &value);
        row(&format!(" {:<10} {}", label, value));
    }
    section_bot();

    if frequent.is_empty() {
        return Ok(());
    }
    section_top("MOST FREQUENT TERMS");
    for (term, count) in frequent {
        row(&format!(
            " {} {}",
            display::pad_left(&count.to_string(), 10),
            themed(GRAY, &[], &format!("{:?}", term))
        ));
    }
    section_bot();
    Ok(())
}
