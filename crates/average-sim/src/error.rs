//! Error types for average-sim.

use thiserror::Error;

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up or reporting a simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration or state handed to the consensus engine
    #[error("Consensus error: {0}")]
    Consensus(#[from] average_consensus::Error),

    /// Initial value range is empty or not finite
    #[error("Invalid value range: [{min}, {max})")]
    InvalidValueRange { min: f64, max: f64 },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
