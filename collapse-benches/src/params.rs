//! Benchmark parameter types used as Criterion identifiers.

use std::fmt;

/// Parameters for a single-trial benchmark.
#[derive(Clone, Copy, Debug)]
pub struct TrialBenchParams {
    /// Nodes in the trial graph.
    pub nodes: usize,
}

impl fmt::Display for TrialBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.nodes)
    }
}

/// Parameters for a full sweep benchmark.
#[derive(Clone, Copy, Debug)]
pub struct SweepBenchParams {
    /// Inclusive upper bound of the sweep.
    pub max_nodes: usize,
    /// Distance between sampled node counts.
    pub step: usize,
}

impl fmt::Display for SweepBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "max={},step={}", self.max_nodes, self.step)
    }
}
