//! Collapse simulator: add random distinct edges until the graph is connected.
//!
//! Each trial draws candidate pairs uniformly from `[0, n) × [0, n)`, rejects
//! self-loops and pairs the oracle already holds, and feeds accepted pairs to
//! the oracle until it reports a single component.

use rand::Rng;
use tracing::{Span, debug, field, instrument};

use crate::{
    Result,
    error::CollapseError,
    oracle::{ConnectivityOracle, NodeId, UnionFindOracle},
};

/// Result of driving one trial to collapse.
///
/// # Examples
/// ```
/// use collapse_core::run_trial;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let outcome = run_trial(10, &mut rng)?;
/// assert_eq!(outcome.nodes(), 10);
/// assert!(outcome.edges() >= 9);
/// assert!(outcome.draws() >= outcome.edges());
/// # Ok::<(), collapse_core::CollapseError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CollapseOutcome {
    nodes: usize,
    edges: usize,
    draws: usize,
}

impl CollapseOutcome {
    const fn already_connected(nodes: usize) -> Self {
        Self {
            nodes,
            edges: 0,
            draws: 0,
        }
    }

    /// Trial size.
    #[must_use]
    pub const fn nodes(&self) -> usize {
        self.nodes
    }

    /// Edges accepted when the oracle first reported one component.
    #[must_use]
    pub const fn edges(&self) -> usize {
        self.edges
    }

    /// Candidate pairs drawn, rejected ones included.
    #[must_use]
    pub const fn draws(&self) -> usize {
        self.draws
    }
}

/// Number of distinct unordered pairs on `nodes` nodes, saturating on
/// overflow.
///
/// # Examples
/// ```
/// use collapse_core::pair_count;
///
/// assert_eq!(pair_count(0), 0);
/// assert_eq!(pair_count(1), 0);
/// assert_eq!(pair_count(5), 10);
/// ```
#[must_use]
pub const fn pair_count(nodes: usize) -> usize {
    if nodes < 2 {
        return 0;
    }
    let (even, odd) = if nodes % 2 == 0 {
        (nodes, nodes - 1)
    } else {
        (nodes - 1, nodes)
    };
    (even / 2).saturating_mul(odd)
}

/// Adds random distinct edges to `oracle` until it reports one component.
///
/// `oracle` must hold exactly the nodes `0..nodes` and no edges. Trials on
/// zero nodes return immediately without touching the oracle; trials whose
/// oracle already reports a single component (one node) return zero edges.
///
/// # Errors
/// Returns [`CollapseError::NodeCountMismatch`] or
/// [`CollapseError::OracleNotEmpty`] when the precondition does not hold,
/// [`CollapseError::Oracle`] when the oracle rejects an operation, and
/// [`CollapseError::EdgeBudgetExceeded`] if every pair has been added without
/// the oracle reporting collapse.
///
/// # Examples
/// ```
/// use collapse_core::{ConnectivityOracle, UnionFindOracle, simulate_collapse};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(3);
/// let mut oracle = UnionFindOracle::with_nodes(6);
/// let outcome = simulate_collapse(6, &mut oracle, &mut rng)?;
/// assert_eq!(oracle.component_count(), 1);
/// assert_eq!(oracle.edge_count(), outcome.edges());
/// # Ok::<(), collapse_core::CollapseError>(())
/// ```
#[instrument(
    name = "collapse.simulate",
    err,
    skip(oracle, rng),
    fields(edges = field::Empty, draws = field::Empty),
)]
pub fn simulate_collapse<O, R>(nodes: usize, oracle: &mut O, rng: &mut R) -> Result<CollapseOutcome>
where
    O: ConnectivityOracle + ?Sized,
    R: Rng + ?Sized,
{
    if nodes == 0 {
        return Ok(CollapseOutcome::already_connected(nodes));
    }
    check_fresh(nodes, oracle)?;

    let outcome = if oracle.component_count() <= 1 {
        CollapseOutcome::already_connected(nodes)
    } else {
        add_edges_until_collapse(nodes, oracle, rng)?
    };

    let span = Span::current();
    span.record("edges", outcome.edges);
    span.record("draws", outcome.draws);
    record_metrics(&outcome);
    Ok(outcome)
}

/// Runs one trial on a fresh [`UnionFindOracle`] and releases it afterwards.
///
/// # Errors
/// Propagates any [`CollapseError`] raised by [`simulate_collapse`].
pub fn run_trial<R>(nodes: usize, rng: &mut R) -> Result<CollapseOutcome>
where
    R: Rng + ?Sized,
{
    let mut oracle = UnionFindOracle::with_nodes(nodes);
    let outcome = simulate_collapse(nodes, &mut oracle, rng);
    oracle.release();
    outcome
}

fn check_fresh<O>(nodes: usize, oracle: &O) -> Result<()>
where
    O: ConnectivityOracle + ?Sized,
{
    let registered = oracle.node_count();
    if registered != nodes {
        return Err(CollapseError::NodeCountMismatch {
            expected: nodes,
            registered,
        });
    }
    let edges = oracle.edge_count();
    if edges != 0 {
        return Err(CollapseError::OracleNotEmpty { edges });
    }
    Ok(())
}

fn add_edges_until_collapse<O, R>(nodes: usize, oracle: &mut O, rng: &mut R) -> Result<CollapseOutcome>
where
    O: ConnectivityOracle + ?Sized,
    R: Rng + ?Sized,
{
    let budget = pair_count(nodes);
    let mut edges = 0_usize;
    let mut draws = 0_usize;

    loop {
        if edges >= budget {
            return Err(CollapseError::EdgeBudgetExceeded { nodes, budget });
        }
        let (left, right) = draw_new_pair(nodes, oracle, rng, &mut draws)?;
        oracle.add_edge(left, right)?;
        edges += 1;

        if oracle.component_count() == 1 {
            debug!(nodes, edges, draws, "graph collapsed to one component");
            return Ok(CollapseOutcome {
                nodes,
                edges,
                draws,
            });
        }
    }
}

/// Rejection-samples a pair that is neither a self-loop nor already present.
fn draw_new_pair<O, R>(
    nodes: usize,
    oracle: &O,
    rng: &mut R,
    draws: &mut usize,
) -> Result<(NodeId, NodeId)>
where
    O: ConnectivityOracle + ?Sized,
    R: Rng + ?Sized,
{
    loop {
        *draws += 1;
        let left = rng.gen_range(0..nodes);
        let right = rng.gen_range(0..nodes);
        if left != right && !oracle.has_edge(left, right)? {
            return Ok((left, right));
        }
    }
}

#[cfg(feature = "metrics")]
fn record_metrics(outcome: &CollapseOutcome) {
    let as_u64 = |value: usize| u64::try_from(value).unwrap_or(u64::MAX);
    let rejected = outcome.draws.saturating_sub(outcome.edges);
    metrics::counter!("collapse_candidate_draws").increment(as_u64(outcome.draws));
    metrics::counter!("collapse_rejected_draws").increment(as_u64(rejected));
    metrics::counter!("collapse_accepted_edges").increment(as_u64(outcome.edges));
}

#[cfg(not(feature = "metrics"))]
const fn record_metrics(_outcome: &CollapseOutcome) {}

#[cfg(test)]
mod property;
