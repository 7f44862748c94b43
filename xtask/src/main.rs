//! Maintenance tasks for tallydex, run as `cargo xtask <task>`.
//!
//! The alias lives in `.cargo/config.toml`.

use anyhow::{bail, ensure, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Counter invariants documented in the source. Each must keep its marker.
const REQUIRED_INVARIANTS: &[(&str, &str)] = &[
    ("src/index/vector.rs", "`ft(d, t) == tf(t, d)`"),
    ("src/index/vector.rs", "`df(t) == Σ_d ft(d, t)`"),
    ("src/index/cache.rs", "each entry"),
    ("src/counter.rs", "a failed increment writes nothing"),
];

const USAGE: &str = "\
cargo xtask <TASK>

Tasks:
  ci        markers, lint, test and smoke, in that order
  markers   Check that every counter invariant is still documented
  lint      rustfmt --check and clippy with warnings denied
  test      Tests with default features, then in-memory only
  persist   RocksDB round-trip tests only
  smoke     Index a small corpus through the CLI and check the ranking
  bench     Criterion benchmarks";

fn main() -> Result<()> {
    let root = workspace_root()?;
    match env::args().nth(1).as_deref() {
        Some("ci") => {
            markers(&root)?;
            lint(&root)?;
            test(&root)?;
            smoke(&root)
        }
        Some("markers") => markers(&root),
        Some("lint") => lint(&root),
        Some("test") => test(&root),
        Some("persist") => persist(&root),
        Some("smoke") => smoke(&root),
        Some("bench") => cargo(&root, &["bench", "--bench", "search_bench"]),
        _ => {
            eprintln!("{USAGE}");
            Ok(())
        }
    }
}

fn workspace_root() -> Result<PathBuf> {
    let xtask_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    xtask_dir
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

fn cargo(root: &Path, args: &[&str]) -> Result<()> {
    eprintln!("$ cargo {}", args.join(" "));
    let status = Command::new(env::var("CARGO").unwrap_or_else(|_| "cargo".into()))
        .args(args)
        .current_dir(root)
        .status()
        .with_context(|| format!("could not spawn cargo {}", args.join(" ")))?;
    ensure!(status.success(), "cargo {} failed", args.join(" "));
    Ok(())
}

fn markers(root: &Path) -> Result<()> {
    let mut missing = Vec::new();
    for (file, text) in REQUIRED_INVARIANTS {
        let source = fs::read_to_string(root.join(file))
            .with_context(|| format!("could not read {file}"))?;
        let documented = source
            .lines()
            .filter(|line| line.contains("INVARIANT:"))
            .any(|line| line.contains(text));
        if !documented {
            missing.push(format!("{file}: {text}"));
        }
    }
    if !missing.is_empty() {
        bail!("undocumented invariants:\n  {}", missing.join("\n  "));
    }
    eprintln!("{} invariant markers present", REQUIRED_INVARIANTS.len());
    Ok(())
}

fn lint(root: &Path) -> Result<()> {
    cargo(root, &["fmt", "--all", "--", "--check"])?;
    cargo(root, &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])
}

fn test(root: &Path) -> Result<()> {
    cargo(root, &["test", "--workspace"])?;
    // MemoryStore with sequential scoring must stand on its own.
    cargo(root, &["test", "--lib", "--tests", "--no-default-features"])
}

fn persist(root: &Path) -> Result<()> {
    cargo(root, &["test", "--lib", "store::rocks"])?;
    cargo(root, &["test", "--test", "integration", "persistence"])
}

/// Drive the release binary against a scratch index: bulk index, search,
/// verify, then reopen and add.
fn smoke(root: &Path) -> Result<()> {
    cargo(root, &["build", "--release", "--bin", "tallydex"])?;
    let bin = root.join("target").join("release").join("tallydex");

    let scratch = env::temp_dir().join(format!("tallydex-smoke-{}", std::process::id()));
    let corpus = scratch.join("corpus");
    let index = scratch.join("index");
    fs::create_dir_all(&corpus)?;
    fs::write(corpus.join("a"), "hello hello hello hello world")?;
    fs::write(corpus.join("b"), "hello tiger tiger")?;
    fs::write(corpus.join("c"), "rumic tiger")?;

    let outcome = (|| -> Result<()> {
        let run = |args: &[&str]| -> Result<Output> {
            let output = Command::new(&bin)
                .arg("--index")
                .arg(&index)
                .args(args)
                .env("NO_COLOR", "1")
                .output()
                .with_context(|| format!("could not run tallydex {}", args.join(" ")))?;
            ensure!(
                output.status.success(),
                "tallydex {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr)
            );
            Ok(output)
        };
        let corpus_arg = corpus.to_string_lossy();

        run(&["index", "--input", &corpus_arg])?;
        expect_lines(&run(&["search", "tiger"])?, &["b", "c"])?;
        expect_lines(&run(&["search", "hello"])?, &["a", "b"])?;
        run(&["verify"])?;

        let rumic = scratch.join("d");
        fs::write(&rumic, "rumic")?;
        run(&["add", "d", &rumic.to_string_lossy()])?;
        expect_lines(&run(&["search", "rumic"])?, &["d", "c"])?;
        run(&["verify"])?;
        Ok(())
    })();

    let _ = fs::remove_dir_all(&scratch);
    outcome?;
    eprintln!("smoke run passed");
    Ok(())
}

fn expect_lines(output: &Output, expected: &[&str]) -> Result<()> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    ensure!(lines == expected, "expected {expected:?}, got {lines:?}");
    Ok(())
}
