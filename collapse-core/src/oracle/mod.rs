//! Connectivity oracle abstraction consumed by the collapse simulator.
//!
//! An oracle maintains an undirected simple graph over a fixed node set and
//! reports how many connected components it currently has. Edges are only
//! ever added, so any incremental connectivity structure satisfies the
//! contract; [`UnionFindOracle`] is the implementation shipped with the crate.

mod union_find;

pub use union_find::UnionFindOracle;

use crate::error::OracleError;

/// Identifier of a node inside one trial, in the range `[0, n)`.
pub type NodeId = usize;

/// Unordered pair of distinct nodes stored as `(low, high)`.
///
/// # Examples
/// ```
/// use collapse_core::Edge;
///
/// let edge = Edge::new(4, 1)?;
/// assert_eq!((edge.low(), edge.high()), (1, 4));
/// assert_eq!(edge, Edge::new(1, 4)?);
/// assert!(Edge::new(2, 2).is_err());
/// # Ok::<(), collapse_core::OracleError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Edge {
    low: NodeId,
    high: NodeId,
}

impl Edge {
    /// Canonicalises `{left, right}`.
    ///
    /// # Errors
    /// Returns [`OracleError::SelfLoop`] when both endpoints are equal.
    pub const fn new(left: NodeId, right: NodeId) -> Result<Self, OracleError> {
        if left == right {
            return Err(OracleError::SelfLoop { node: left });
        }
        let (low, high) = if left < right {
            (left, right)
        } else {
            (right, left)
        };
        Ok(Self { low, high })
    }

    /// Smaller endpoint.
    #[must_use]
    pub const fn low(self) -> NodeId {
        self.low
    }

    /// Larger endpoint.
    #[must_use]
    pub const fn high(self) -> NodeId {
        self.high
    }
}

/// Incremental connectivity structure over a fixed node set.
///
/// Implementations must keep [`component_count`](Self::component_count)
/// equal to the number of registered nodes while no edges exist and must
/// never let it increase. `has_edge` is symmetric in its arguments.
///
/// # Examples
/// ```
/// use collapse_core::{ConnectivityOracle, UnionFindOracle};
///
/// let mut oracle = UnionFindOracle::new();
/// for node in 0..3 {
///     oracle.register_node(node)?;
/// }
/// assert_eq!(oracle.component_count(), 3);
///
/// oracle.add_edge(0, 2)?;
/// assert!(oracle.has_edge(2, 0)?);
/// assert_eq!(oracle.component_count(), 2);
/// oracle.release();
/// # Ok::<(), collapse_core::OracleError>(())
/// ```
pub trait ConnectivityOracle {
    /// Adds `node` to the graph. Called once per node before any edge exists.
    ///
    /// # Errors
    /// Returns an [`OracleError`] when the node is already present, when it
    /// breaks the implementation's registration order, or when edges exist.
    fn register_node(&mut self, node: NodeId) -> Result<(), OracleError>;

    /// Reports whether an edge joins `left` and `right`.
    ///
    /// # Errors
    /// Returns [`OracleError::UnknownNode`] for unregistered endpoints.
    fn has_edge(&self, left: NodeId, right: NodeId) -> Result<bool, OracleError>;

    /// Adds the edge `{left, right}`.
    ///
    /// # Errors
    /// Returns an [`OracleError`] for unknown endpoints, self-loops and edges
    /// that already exist.
    fn add_edge(&mut self, left: NodeId, right: NodeId) -> Result<(), OracleError>;

    /// Number of connected components among the registered nodes.
    fn component_count(&self) -> usize;

    /// Number of registered nodes.
    fn node_count(&self) -> usize;

    /// Number of edges added so far.
    fn edge_count(&self) -> usize;

    /// Frees every resource held by the oracle.
    ///
    /// Dropping has the same effect; calling this makes the release point
    /// visible at the call site.
    fn release(self)
    where
        Self: Sized,
    {
        drop(self);
    }
}
