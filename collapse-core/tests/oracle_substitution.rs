mod common;

use collapse_core::{ConnectivityOracle, UnionFindOracle, simulate_collapse};
use common::SearchOracle;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

#[rstest]
#[case(2, 1)]
#[case(10, 2)]
#[case(25, 3)]
#[case(60, 4)]
fn any_correct_oracle_yields_the_same_trial(#[case] nodes: usize, #[case] seed: u64) {
    let mut search = SearchOracle::with_nodes(nodes);
    let from_search = simulate_collapse(nodes, &mut search, &mut SmallRng::seed_from_u64(seed))
        .expect("search oracle trial must succeed");

    let mut union_find = UnionFindOracle::with_nodes(nodes);
    let from_union_find =
        simulate_collapse(nodes, &mut union_find, &mut SmallRng::seed_from_u64(seed))
            .expect("union-find trial must succeed");

    assert_eq!(from_search, from_union_find);
    assert_eq!(search.component_count(), 1);
    assert_eq!(search.edge_count(), from_search.edges());
}

#[test]
fn search_oracle_can_be_populated_incrementally() {
    let mut oracle = SearchOracle::default();
    for node in 0..8 {
        oracle.register_node(node).expect("registration must succeed");
    }
    let outcome = simulate_collapse(8, &mut oracle, &mut SmallRng::seed_from_u64(8))
        .expect("trial must succeed");
    assert!(outcome.edges() >= 7);
    oracle.release();
}
