//! Replays console fixtures and diffs the transcripts.
//!
//! Usage: `dev-test-runner [PATTERN]...`, defaulting to the bundled
//! `fixtures/*.json`.
mod path_de;

use std::path::Path;
use anyhow::{anyhow, Context};
use colored::Colorize;
use serde::Deserialize;

use canon_set::console::Console;

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    input: Vec<String>,
    expected: Vec<String>,
}

#[derive(Debug, Default)]
struct Tally {
    passed: usize,
    failed: usize,
}

fn main() -> anyhow::Result<()> {
    let mut patterns: Vec<String> = std::env::args().skip(1).collect();
    if patterns.is_empty() {
        patterns.push(format!("{}/fixtures/*.json", env!("CARGO_MANIFEST_DIR")));
    }
    let mut tally = Tally::default();
    for pattern in &patterns {
        for path in glob::glob(pattern)? {
            run_fixture_file(&path?, &mut tally)?;
        }
    }
    let summary = format!("{} passed, {} failed", tally.passed, tally.failed);
    if tally.failed > 0 {
        eprintln!("{}", summary.red().bold());
        std::process::exit(1);
    }
    eprintln!("{}", summary.green().bold());
    Ok(())
}

fn run_fixture_file(path: &Path, tally: &mut Tally) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture file ({})", path.display()))?;
    let cases = path_de::from_str_with_path::<Vec<Case>>(&source)
        .map_err(|error| anyhow!("failed to parse fixture file ({}): {error}", path.display()))?;
    eprintln!("—— {} ——", path.display());
    for case in cases {
        let actual = run_case(&case)?;
        let expected: Vec<&str> = case.expected.iter().map(|line| line.trim_end()).collect();
        if actual == expected {
            tally.passed += 1;
            eprintln!("✅ {}", case.name);
            continue;
        }
        tally.failed += 1;
        eprintln!("❌ {}", case.name.red());
        for (index, (want, got)) in expected.iter().zip(actual.iter()).enumerate() {
            if *want != got.as_str() {
                eprintln!("   line {index}: expected {:?}, got {:?}", want, got.yellow());
            }
        }
        if expected.len() != actual.len() {
            eprintln!("   expected {} lines, got {}", expected.len(), actual.len());
        }
    }
    Ok(())
}

fn run_case(case: &Case) -> anyhow::Result<Vec<String>> {
    let input = case.input.join("\n");
    let mut console = Console::new(Vec::new()).with_echo(true);
    console.run(input.as_bytes())?;
    let transcript = String::from_utf8(console.into_inner())?;
    Ok(transcript.lines().map(|line| line.trim_end().to_owned()).collect())
}
