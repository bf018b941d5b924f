//! Union-find backed connectivity oracle.
//!
//! Edges are never removed during a trial, so a disjoint-set forest with
//! path compression and union by rank answers component counts in amortised
//! near-constant time. A hash set of canonical edges answers `has_edge`.

use std::collections::HashSet;

use crate::error::OracleError;

use super::{ConnectivityOracle, Edge, NodeId};

#[derive(Clone, Debug, Default)]
struct DisjointSet {
    parent: Vec<NodeId>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn with_len(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    fn len(&self) -> usize {
        self.parent.len()
    }

    fn push(&mut self) {
        self.parent.push(self.parent.len());
        self.rank.push(0);
    }

    fn find(&mut self, mut node: NodeId) -> NodeId {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merges the sets holding `left` and `right`; returns whether they were
    /// distinct.
    fn union(&mut self, left: NodeId, right: NodeId) -> bool {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return false;
        }
        if self.rank[left] < self.rank[right] {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if self.rank[left] == self.rank[right] {
            self.rank[left] = self.rank[left].saturating_add(1);
        }
        true
    }
}

/// [`ConnectivityOracle`] built on a disjoint-set forest.
///
/// Nodes must be registered densely in order `0, 1, 2, …`, which is how the
/// simulator populates a trial.
///
/// # Examples
/// ```
/// use collapse_core::{ConnectivityOracle, UnionFindOracle};
///
/// let mut oracle = UnionFindOracle::with_nodes(4);
/// oracle.add_edge(0, 1)?;
/// oracle.add_edge(2, 3)?;
/// assert_eq!(oracle.component_count(), 2);
/// oracle.add_edge(1, 2)?;
/// assert_eq!(oracle.component_count(), 1);
/// assert_eq!(oracle.edge_count(), 3);
/// # Ok::<(), collapse_core::OracleError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct UnionFindOracle {
    forest: DisjointSet,
    edges: HashSet<Edge>,
    components: usize,
}

impl UnionFindOracle {
    /// Creates an oracle with no nodes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an oracle with nodes `0..nodes` registered and no edges.
    #[must_use]
    pub fn with_nodes(nodes: usize) -> Self {
        Self {
            forest: DisjointSet::with_len(nodes),
            edges: HashSet::new(),
            components: nodes,
        }
    }

    /// Returns whether `left` and `right` currently share a component.
    ///
    /// # Errors
    /// Returns [`OracleError::UnknownNode`] for unregistered endpoints.
    pub fn connected(&mut self, left: NodeId, right: NodeId) -> Result<bool, OracleError> {
        self.check_node(left)?;
        self.check_node(right)?;
        Ok(self.forest.find(left) == self.forest.find(right))
    }

    fn check_node(&self, node: NodeId) -> Result<(), OracleError> {
        let node_count = self.forest.len();
        if node < node_count {
            Ok(())
        } else {
            Err(OracleError::UnknownNode { node, node_count })
        }
    }
}

impl ConnectivityOracle for UnionFindOracle {
    fn register_node(&mut self, node: NodeId) -> Result<(), OracleError> {
        if !self.edges.is_empty() {
            return Err(OracleError::RegistrationAfterEdges { node });
        }
        let expected = self.forest.len();
        if node < expected {
            return Err(OracleError::DuplicateNode { node });
        }
        if node > expected {
            return Err(OracleError::NodeOutOfOrder { node, expected });
        }
        self.forest.push();
        self.components += 1;
        Ok(())
    }

    fn has_edge(&self, left: NodeId, right: NodeId) -> Result<bool, OracleError> {
        self.check_node(left)?;
        self.check_node(right)?;
        // No self-loop is ever stored.
        Ok(Edge::new(left, right).is_ok_and(|edge| self.edges.contains(&edge)))
    }

    fn add_edge(&mut self, left: NodeId, right: NodeId) -> Result<(), OracleError> {
        self.check_node(left)?;
        self.check_node(right)?;
        let edge = Edge::new(left, right)?;
        if !self.edges.insert(edge) {
            return Err(OracleError::DuplicateEdge {
                left: edge.low(),
                right: edge.high(),
            });
        }
        if self.forest.union(left, right) {
            self.components -= 1;
        }
        Ok(())
    }

    fn component_count(&self) -> usize {
        self.components
    }

    fn node_count(&self) -> usize {
        self.forest.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
