//! Collapse core library.
//!
//! Estimates how many random distinct edges an edgeless graph absorbs before
//! it becomes a single connected component. [`simulate_collapse`] runs one
//! trial against any [`ConnectivityOracle`]; [`SweepPlan`] repeats trials
//! over a range of node counts; the analytic helpers give closed-form
//! estimates to compare against.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod analytic;
mod error;
mod fit;
mod oracle;
mod simulate;
mod sweep;
#[cfg(test)]
mod test_utils;

pub use crate::{
    analytic::{asymptotic_edges_to_collapse, connectivity_probability, exact_edges_to_collapse},
    error::{
        AnalyticError, AnalyticErrorCode, CollapseError, CollapseErrorCode, FitError,
        FitErrorCode, OracleError, OracleErrorCode, Result,
    },
    fit::LinearFit,
    oracle::{ConnectivityOracle, Edge, NodeId, UnionFindOracle},
    simulate::{CollapseOutcome, pair_count, run_trial, simulate_collapse},
    sweep::{DEFAULT_SWEEP_STEP, Sweep, SweepBuilder, SweepPlan, SweepPoint},
};
