//! Benchmark setup error type.

use collapse_core::{CollapseError, OracleError};

/// Errors that may occur while preparing a benchmark.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// A trial or sweep could not be configured or run.
    #[error("collapse setup failed: {0}")]
    Collapse(#[from] CollapseError),
    /// Building a pre-populated oracle failed.
    #[error("oracle setup failed: {0}")]
    Oracle(#[from] OracleError),
}
