//! Shared test utilities for `collapse-core`.

use collapse_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{
    error::OracleError,
    oracle::{ConnectivityOracle, Edge, NodeId, UnionFindOracle},
};

/// Builds a proptest configuration from the shared CI profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Oracle wrapper that records every accepted edge and the component count
/// observed after it.
#[derive(Debug, Default)]
pub(crate) struct RecordingOracle {
    inner: UnionFindOracle,
    accepted: Vec<Edge>,
    components_after: Vec<usize>,
}

impl RecordingOracle {
    pub(crate) fn with_nodes(nodes: usize) -> Self {
        Self {
            inner: UnionFindOracle::with_nodes(nodes),
            ..Self::default()
        }
    }

    /// Edges in the order the simulator added them.
    pub(crate) fn accepted(&self) -> &[Edge] {
        &self.accepted
    }

    /// Component count observed right after each accepted edge.
    pub(crate) fn components_after(&self) -> &[usize] {
        &self.components_after
    }
}

impl ConnectivityOracle for RecordingOracle {
    fn register_node(&mut self, node: NodeId) -> Result<(), OracleError> {
        self.inner.register_node(node)
    }

    fn has_edge(&self, left: NodeId, right: NodeId) -> Result<bool, OracleError> {
        self.inner.has_edge(left, right)
    }

    fn add_edge(&mut self, left: NodeId, right: NodeId) -> Result<(), OracleError> {
        self.inner.add_edge(left, right)?;
        self.accepted.push(Edge::new(left, right)?);
        self.components_after.push(self.inner.component_count());
        Ok(())
    }

    fn component_count(&self) -> usize {
        self.inner.component_count()
    }

    fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }
}

/// Oracle that never merges components, used to exercise the edge budget.
#[derive(Debug, Default)]
pub(crate) struct NeverCollapsingOracle {
    inner: UnionFindOracle,
    nodes: usize,
}

impl NeverCollapsingOracle {
    pub(crate) fn with_nodes(nodes: usize) -> Self {
        Self {
            inner: UnionFindOracle::with_nodes(nodes),
            nodes,
        }
    }
}

impl ConnectivityOracle for NeverCollapsingOracle {
    fn register_node(&mut self, node: NodeId) -> Result<(), OracleError> {
        self.inner.register_node(node)?;
        self.nodes += 1;
        Ok(())
    }

    fn has_edge(&self, left: NodeId, right: NodeId) -> Result<bool, OracleError> {
        self.inner.has_edge(left, right)
    }

    fn add_edge(&mut self, left: NodeId, right: NodeId) -> Result<(), OracleError> {
        self.inner.add_edge(left, right)
    }

    fn component_count(&self) -> usize {
        self.nodes
    }

    fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }
}
