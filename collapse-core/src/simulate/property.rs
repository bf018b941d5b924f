//! Property-based tests for the collapse simulator.
//!
//! Every trial is replayed through a recording oracle so the accepted edge
//! sequence and the component count after each edge can be checked against
//! the collapse invariants.

use std::collections::HashSet;

use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

use crate::{
    oracle::ConnectivityOracle,
    test_utils::{RecordingOracle, suite_proptest_config},
};

use super::{pair_count, simulate_collapse};

const MAX_NODES: usize = 48;

fn run_collapse_invariants(nodes: usize, seed: u64) -> TestCaseResult {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut oracle = RecordingOracle::with_nodes(nodes);
    let outcome = simulate_collapse(nodes, &mut oracle, &mut rng)
        .map_err(|err| TestCaseError::fail(format!("trial failed: {err}")))?;
    let edges = outcome.edges();

    prop_assert!(edges >= 1, "n={nodes} collapsed with no edges");
    prop_assert!(edges <= pair_count(nodes), "n={nodes} used {edges} edges");
    prop_assert!(edges >= nodes - 1, "a connected graph needs n-1 edges");
    prop_assert_eq!(oracle.accepted().len(), edges);

    let mut seen = HashSet::with_capacity(edges);
    for edge in oracle.accepted() {
        prop_assert!(edge.low() < edge.high());
        prop_assert!(edge.high() < nodes);
        prop_assert!(seen.insert(*edge), "edge {edge:?} accepted twice");
    }

    let counts = oracle.components_after();
    let mut previous = nodes;
    for &count in counts {
        prop_assert!(count <= previous, "component count rose from {previous} to {count}");
        previous = count;
    }

    let (last, before) = counts
        .split_last()
        .ok_or_else(|| TestCaseError::fail("no component counts recorded"))?;
    prop_assert_eq!(*last, 1);
    prop_assert!(before.iter().all(|&count| count > 1), "collapse detected late");
    prop_assert_eq!(oracle.component_count(), 1);
    Ok(())
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn collapse_invariants_hold(nodes in 2..=MAX_NODES, seed in any::<u64>()) {
        run_collapse_invariants(nodes, seed)?;
    }
}

#[rstest]
#[case(2)]
#[case(10)]
#[case(30)]
fn every_seed_respects_bounds(#[case] nodes: usize) {
    for seed in 0..200 {
        run_collapse_invariants(nodes, seed).expect("collapse invariants must hold");
    }
}

#[test]
fn repeated_trials_vary_with_the_seed() {
    let counts: HashSet<usize> = (0..64)
        .map(|seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut oracle = RecordingOracle::with_nodes(40);
            simulate_collapse(40, &mut oracle, &mut rng)
                .expect("trial must succeed")
                .edges()
        })
        .collect();
    assert!(counts.len() > 1, "64 seeds produced a single edge count");
}
