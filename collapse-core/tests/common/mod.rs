use std::collections::{BTreeSet, VecDeque};

use collapse_core::{ConnectivityOracle, NodeId, OracleError};

/// Adjacency-set oracle that recounts components by breadth-first search on
/// every query. Slow, but shares no code with the union-find oracle.
#[derive(Debug, Default)]
pub struct SearchOracle {
    adjacency: Vec<BTreeSet<NodeId>>,
    edges: usize,
}

impl SearchOracle {
    #[must_use]
    pub fn with_nodes(nodes: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); nodes],
            edges: 0,
        }
    }

    fn check(&self, node: NodeId) -> Result<(), OracleError> {
        if node < self.adjacency.len() {
            Ok(())
        } else {
            Err(OracleError::UnknownNode {
                node,
                node_count: self.adjacency.len(),
            })
        }
    }
}

impl ConnectivityOracle for SearchOracle {
    fn register_node(&mut self, node: NodeId) -> Result<(), OracleError> {
        if self.edges > 0 {
            return Err(OracleError::RegistrationAfterEdges { node });
        }
        if node != self.adjacency.len() {
            return Err(OracleError::DuplicateNode { node });
        }
        self.adjacency.push(BTreeSet::new());
        Ok(())
    }

    fn has_edge(&self, left: NodeId, right: NodeId) -> Result<bool, OracleError> {
        self.check(left)?;
        self.check(right)?;
        Ok(self.adjacency[left].contains(&right))
    }

    fn add_edge(&mut self, left: NodeId, right: NodeId) -> Result<(), OracleError> {
        self.check(left)?;
        self.check(right)?;
        if left == right {
            return Err(OracleError::SelfLoop { node: left });
        }
        if !self.adjacency[left].insert(right) {
            return Err(OracleError::DuplicateEdge {
                left: left.min(right),
                right: left.max(right),
            });
        }
        self.adjacency[right].insert(left);
        self.edges += 1;
        Ok(())
    }

    fn component_count(&self) -> usize {
        let mut seen = vec![false; self.adjacency.len()];
        let mut components = 0;
        for start in 0..self.adjacency.len() {
            if seen[start] {
                continue;
            }
            components += 1;
            seen[start] = true;
            let mut queue = VecDeque::from([start]);
            while let Some(node) = queue.pop_front() {
                for &next in &self.adjacency[node] {
                    if !seen[next] {
                        seen[next] = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        components
    }

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edges
    }
}
