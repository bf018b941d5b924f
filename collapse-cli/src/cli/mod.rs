//! Command-line interface for the collapse experiment.
//!
//! `collapse --maxNodes N` runs the connectivity collapse sweep. The
//! `estimate` and `fit` subcommands compute closed-form edge estimates and
//! fit a line through previously printed sweep results.

mod commands;

pub use commands::{
    Cli, CliError, Command, EstimateArgs, EstimateMethod, ExecutionSummary, FitArgs, run_cli,
    run_cli_with_rng,
};

#[cfg(test)]
mod test_helpers;
