//! Error types for average-consensus.

use average_topology::TopologyError;
use thiserror::Error;

/// Result type for average-consensus operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or initializing a run.
///
/// Nothing inside a running round is fatal; these only occur before the first
/// round or when a caller hands the state a vector of the wrong shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Topology parameters cannot produce a connected simple graph.
    #[error("invalid topology: {0}")]
    Topology(#[from] TopologyError),

    /// A value vector does not have one entry per node.
    #[error("expected {expected} values, got {actual}")]
    ValueCountMismatch { expected: usize, actual: usize },

    /// Initial values must be finite.
    #[error("node {node} has non-finite value {value}")]
    NonFiniteValue { node: usize, value: f64 },

    /// Target precision must be a positive finite number.
    #[error("target precision must be positive and finite, got {0}")]
    InvalidPrecision(f64),
}
