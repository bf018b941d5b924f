//! Error types for the collapse core library.
//!
//! Every public error enum carries a stable machine-readable code so the CLI
//! can log failures without matching on display strings.

use std::fmt;

use thiserror::Error;

use crate::oracle::NodeId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// A violation of the [`crate::ConnectivityOracle`] contract.
///
/// The simulator never triggers these against a correct oracle; they surface
/// programming faults in callers or in alternative oracle implementations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum OracleError {
    /// The node was already registered.
    #[error("node {node} is already registered")]
    DuplicateNode {
        /// Offending node identifier.
        node: NodeId,
    },
    /// Nodes must be registered densely as `0, 1, 2, …`.
    #[error("node {node} registered out of order; expected node {expected}")]
    NodeOutOfOrder {
        /// Offending node identifier.
        node: NodeId,
        /// Identifier the oracle expected next.
        expected: NodeId,
    },
    /// Registration is closed once the first edge exists.
    #[error("node {node} registered after edges were added")]
    RegistrationAfterEdges {
        /// Offending node identifier.
        node: NodeId,
    },
    /// The node was never registered.
    #[error("node {node} is not registered (oracle holds {node_count} nodes)")]
    UnknownNode {
        /// Offending node identifier.
        node: NodeId,
        /// Number of nodes the oracle holds.
        node_count: usize,
    },
    /// Edges must join two distinct nodes.
    #[error("self-loop on node {node} is not a valid edge")]
    SelfLoop {
        /// Node the loop was requested on.
        node: NodeId,
    },
    /// The edge is already present.
    #[error("edge {{{left}, {right}}} already exists")]
    DuplicateEdge {
        /// Lower endpoint.
        left: NodeId,
        /// Higher endpoint.
        right: NodeId,
    },
}

define_error_codes! {
    /// Stable codes describing [`OracleError`] variants.
    enum OracleErrorCode for OracleError {
        /// The node was already registered.
        DuplicateNode => DuplicateNode { .. } => "ORACLE_DUPLICATE_NODE",
        /// Nodes must be registered densely.
        NodeOutOfOrder => NodeOutOfOrder { .. } => "ORACLE_NODE_OUT_OF_ORDER",
        /// Registration is closed once the first edge exists.
        RegistrationAfterEdges => RegistrationAfterEdges { .. } => "ORACLE_REGISTRATION_AFTER_EDGES",
        /// The node was never registered.
        UnknownNode => UnknownNode { .. } => "ORACLE_UNKNOWN_NODE",
        /// Edges must join two distinct nodes.
        SelfLoop => SelfLoop { .. } => "ORACLE_SELF_LOOP",
        /// The edge is already present.
        DuplicateEdge => DuplicateEdge { .. } => "ORACLE_DUPLICATE_EDGE",
    }
}

/// Error produced while running a collapse trial or a sweep.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CollapseError {
    /// The oracle handed to the simulator already contained edges.
    #[error("oracle must start without edges but holds {edges}")]
    OracleNotEmpty {
        /// Edges present at entry.
        edges: usize,
    },
    /// The oracle's node set does not match the requested trial size.
    #[error("trial expects {expected} nodes but the oracle holds {registered}")]
    NodeCountMismatch {
        /// Node count requested for the trial.
        expected: usize,
        /// Nodes registered in the oracle.
        registered: usize,
    },
    /// More edges were accepted than a simple graph on `nodes` can hold.
    #[error("trial on {nodes} nodes accepted more than {budget} edges without collapsing")]
    EdgeBudgetExceeded {
        /// Trial size.
        nodes: usize,
        /// Number of distinct pairs, `nodes * (nodes - 1) / 2`.
        budget: usize,
    },
    /// Sweep step must be positive.
    #[error("sweep step must be at least 1 (got {got})")]
    InvalidSweepStep {
        /// Step supplied by the caller.
        got: usize,
    },
    /// The oracle rejected an operation.
    #[error("connectivity oracle failed: {0}")]
    Oracle(#[from] OracleError),
}

define_error_codes! {
    /// Stable codes describing [`CollapseError`] variants.
    enum CollapseErrorCode for CollapseError {
        /// The oracle handed to the simulator already contained edges.
        OracleNotEmpty => OracleNotEmpty { .. } => "COLLAPSE_ORACLE_NOT_EMPTY",
        /// The oracle's node set does not match the trial size.
        NodeCountMismatch => NodeCountMismatch { .. } => "COLLAPSE_NODE_COUNT_MISMATCH",
        /// More edges were accepted than a simple graph can hold.
        EdgeBudgetExceeded => EdgeBudgetExceeded { .. } => "COLLAPSE_EDGE_BUDGET_EXCEEDED",
        /// Sweep step must be positive.
        InvalidSweepStep => InvalidSweepStep { .. } => "COLLAPSE_INVALID_SWEEP_STEP",
        /// The oracle rejected an operation.
        OracleFailure => Oracle(..) => "COLLAPSE_ORACLE_FAILURE",
    }
}

impl CollapseError {
    /// Retrieve the inner [`OracleErrorCode`] when the oracle raised the error.
    #[must_use]
    pub const fn oracle_code(&self) -> Option<OracleErrorCode> {
        match self {
            Self::Oracle(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Invalid input to the closed-form connectivity estimates.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AnalyticError {
    /// Edge probability outside `[0, 1]`.
    #[error("edge probability must lie in [0, 1] (got {got})")]
    InvalidProbability {
        /// Probability supplied by the caller.
        got: f64,
    },
    /// Connectivity threshold outside `(0, 1]`.
    #[error("connectivity threshold must lie in (0, 1] (got {got})")]
    InvalidThreshold {
        /// Threshold supplied by the caller.
        got: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`AnalyticError`] variants.
    enum AnalyticErrorCode for AnalyticError {
        /// Edge probability outside `[0, 1]`.
        InvalidProbability => InvalidProbability { .. } => "ANALYTIC_INVALID_PROBABILITY",
        /// Connectivity threshold outside `(0, 1]`.
        InvalidThreshold => InvalidThreshold { .. } => "ANALYTIC_INVALID_THRESHOLD",
    }
}

/// Failure to fit a line through sweep results.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum FitError {
    /// A line needs at least two points.
    #[error("linear fit needs at least 2 points (got {points})")]
    TooFewPoints {
        /// Number of points supplied.
        points: usize,
    },
    /// Every point shares the same node count, so the slope is undefined.
    #[error("all {points} points share the same node count")]
    DegenerateNodes {
        /// Number of points supplied.
        points: usize,
    },
    /// A coordinate was NaN or infinite.
    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint {
        /// Position of the offending point.
        index: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`FitError`] variants.
    enum FitErrorCode for FitError {
        /// A line needs at least two points.
        TooFewPoints => TooFewPoints { .. } => "FIT_TOO_FEW_POINTS",
        /// Every point shares the same node count.
        DegenerateNodes => DegenerateNodes { .. } => "FIT_DEGENERATE_NODES",
        /// A coordinate was NaN or infinite.
        NonFinitePoint => NonFinitePoint { .. } => "FIT_NON_FINITE_POINT",
    }
}

/// Convenient alias for results returned by the simulation API.
pub type Result<T> = core::result::Result<T, CollapseError>;
