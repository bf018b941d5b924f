//! Small helpers shared across CLI tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use rand::{SeedableRng, rngs::SmallRng};
use tempfile::TempDir;

use super::{Cli, CliError, ExecutionSummary, run_cli_with_rng};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// Runs `cli` with a seeded generator and returns the summary and output.
pub(super) fn run_seeded(cli: Cli, seed: u64) -> Result<(ExecutionSummary, String), CliError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut output = Vec::new();
    let summary = run_cli_with_rng(cli, &mut rng, &mut output)?;
    let text = match String::from_utf8(output) {
        Ok(text) => text,
        Err(err) => panic!("command wrote invalid UTF-8: {err}"),
    };
    Ok((summary, text))
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_seeded(cli, 0) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

/// Parses whitespace-separated `usize` pairs from sweep output.
pub(super) fn sweep_lines(output: &str) -> Vec<(usize, usize)> {
    output
        .lines()
        .map(|line| {
            let mut fields = line.split(' ').map(|field| match field.parse::<usize>() {
                Ok(value) => value,
                Err(err) => panic!("line `{line}` holds a non-integer field: {err}"),
            });
            match (fields.next(), fields.next(), fields.next()) {
                (Some(nodes), Some(edges), None) => (nodes, edges),
                _ => panic!("line `{line}` does not hold exactly two fields"),
            }
        })
        .collect()
}
