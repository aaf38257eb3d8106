//! Error types for the Wavecast core library.
//!
//! Defines error enums exposed by the public API, their stable machine-readable
//! codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

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

/// An error produced while assembling a [`crate::Graph`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The graph was declared with zero nodes.
    #[error("graph must contain at least one node")]
    Empty,
    /// An edge referenced a node outside `[0, node_count)`.
    #[error("node {node} is out of range for a graph of {node_count} nodes")]
    NodeOutOfRange {
        /// The offending node id.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// An edge joined a node to itself.
    #[error("self-loop on node {node} is not permitted")]
    SelfLoop {
        /// Node that appeared on both ends of the edge.
        node: usize,
    },
    /// Adjacency listed `neighbour` under `node` but not the reverse.
    #[error("adjacency lists {neighbour} under node {node} but not {node} under {neighbour}")]
    Asymmetric {
        /// Node whose list names `neighbour`.
        node: usize,
        /// Node whose list omits `node`.
        neighbour: usize,
    },
    /// A network carried a different number of positions than nodes.
    #[error("network has {positions} positions for {node_count} nodes")]
    PositionCountMismatch {
        /// Number of positions supplied.
        positions: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The graph was declared with zero nodes.
        Empty => Empty => "GRAPH_EMPTY",
        /// An edge referenced a node outside the graph.
        NodeOutOfRange => NodeOutOfRange { .. } => "GRAPH_NODE_OUT_OF_RANGE",
        /// An edge joined a node to itself.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// An adjacency entry had no reverse entry.
        Asymmetric => Asymmetric { .. } => "GRAPH_ASYMMETRIC",
        /// Positions and nodes disagreed in number.
        PositionCountMismatch => PositionCountMismatch { .. } => "GRAPH_POSITION_COUNT_MISMATCH",
    }
}

/// An error produced by [`crate::PropagationSimulator`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PropagationError {
    /// Simulation was requested on a graph without nodes.
    #[error("cannot simulate propagation on an empty graph")]
    EmptyGraph,
    /// The origin node does not exist in the graph.
    #[error("origin node {origin} is out of range for a graph of {node_count} nodes")]
    OriginOutOfRange {
        /// Requested origin node.
        origin: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// The round counter exceeded the node count, so some node relayed twice.
    #[error("propagation exceeded {rounds} rounds on a graph of {node_count} nodes")]
    Runaway {
        /// Rounds completed when the simulation aborted.
        rounds: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`PropagationError`] variants.
    enum PropagationErrorCode for PropagationError {
        /// Simulation was requested on a graph without nodes.
        EmptyGraph => EmptyGraph => "PROPAGATION_EMPTY_GRAPH",
        /// The origin node does not exist in the graph.
        OriginOutOfRange => OriginOutOfRange { .. } => "PROPAGATION_ORIGIN_OUT_OF_RANGE",
        /// The round counter exceeded the node count.
        Runaway => Runaway { .. } => "PROPAGATION_RUNAWAY",
    }
}

/// Error type produced when configuring or running [`crate::Wavecast`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum WavecastError {
    /// Node count must be greater than zero.
    #[error("total_nodes must be at least 1 (got {got})")]
    InvalidNodeCount {
        /// The invalid node count supplied by the caller.
        got: usize,
    },
    /// Per-node connection target must be greater than zero.
    #[error("connections_per_node must be at least 1 (got {got})")]
    InvalidConnectionsPerNode {
        /// The invalid connection target supplied by the caller.
        got: usize,
    },
    /// Connection radius must be a finite value in `[0, 1]`.
    #[error("max_distance must be a finite value in [0, 1] (got {got})")]
    InvalidMaxDistance {
        /// The invalid radius supplied by the caller.
        got: f64,
    },
    /// Distance decay exponent must be finite and non-negative.
    #[error("distance_weight must be finite and non-negative (got {got})")]
    InvalidDistanceWeight {
        /// The invalid exponent supplied by the caller.
        got: f64,
    },
    /// Batch size must be greater than zero.
    #[error("batch_size must be at least 1 (got {got})")]
    InvalidBatchSize {
        /// The invalid batch size supplied by the caller.
        got: usize,
    },
    /// The origin node lies outside the configured network.
    #[error("origin_node {origin} is out of range for {total_nodes} nodes")]
    OriginOutOfRange {
        /// Requested origin node.
        origin: usize,
        /// Configured node count.
        total_nodes: usize,
    },
    /// Graph construction failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Propagation failed.
    #[error(transparent)]
    Propagation(#[from] PropagationError),
}

define_error_codes! {
    /// Stable codes describing [`WavecastError`] variants.
    enum WavecastErrorCode for WavecastError {
        /// Node count must be greater than zero.
        InvalidNodeCount => InvalidNodeCount { .. } => "WAVECAST_INVALID_NODE_COUNT",
        /// Per-node connection target must be greater than zero.
        InvalidConnectionsPerNode => InvalidConnectionsPerNode { .. } => "WAVECAST_INVALID_CONNECTIONS_PER_NODE",
        /// Connection radius was outside `[0, 1]` or not finite.
        InvalidMaxDistance => InvalidMaxDistance { .. } => "WAVECAST_INVALID_MAX_DISTANCE",
        /// Distance decay exponent was negative or not finite.
        InvalidDistanceWeight => InvalidDistanceWeight { .. } => "WAVECAST_INVALID_DISTANCE_WEIGHT",
        /// Batch size must be greater than zero.
        InvalidBatchSize => InvalidBatchSize { .. } => "WAVECAST_INVALID_BATCH_SIZE",
        /// The origin node lies outside the configured network.
        OriginOutOfRange => OriginOutOfRange { .. } => "WAVECAST_ORIGIN_OUT_OF_RANGE",
        /// Graph construction failed.
        GraphFailure => Graph(..) => "WAVECAST_GRAPH_FAILURE",
        /// Propagation failed.
        PropagationFailure => Propagation(..) => "WAVECAST_PROPAGATION_FAILURE",
    }
}

impl WavecastError {
    /// Retrieve the inner [`PropagationErrorCode`] when the error originated in
    /// the simulator.
    #[must_use]
    pub const fn propagation_code(&self) -> Option<PropagationErrorCode> {
        match self {
            Self::Propagation(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, WavecastError>;
