//! Run configuration.

use average_topology::{TopologyGenerator, DEFAULT_EDGE_COUNT, DEFAULT_NODE_COUNT};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default convergence threshold on the per-round max change.
pub const DEFAULT_TARGET_PRECISION: f64 = 1e-4;

/// Default hard stop on the number of rounds.
pub const DEFAULT_MAX_ITERATIONS: u32 = 50;

/// Configuration for one consensus run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusConfig {
    /// Graph size
    pub node_count: usize,
    /// Density control: exact number of undirected edges
    pub edge_count: usize,
    /// Converged once the max per-node change in a round drops below this
    pub target_precision: f64,
    /// Stop after this many rounds without convergence
    pub max_iterations: u32,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            edge_count: DEFAULT_EDGE_COUNT,
            target_precision: DEFAULT_TARGET_PRECISION,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl ConsensusConfig {
    /// Check every option before a run starts.
    pub fn validate(&self) -> Result<()> {
        self.generator()?;
        if !(self.target_precision.is_finite() && self.target_precision > 0.0) {
            return Err(Error::InvalidPrecision(self.target_precision));
        }
        Ok(())
    }

    /// A topology generator for the configured node and edge counts.
    pub fn generator(&self) -> Result<TopologyGenerator> {
        Ok(TopologyGenerator::new(self.node_count, self.edge_count)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use average_topology::TopologyError;

    #[test]
    fn defaults_are_valid() {
        let config = ConsensusConfig::default();
        assert_eq!(config.node_count, 10);
        assert_eq!(config.edge_count, 15);
        assert_eq!(config.max_iterations, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_precision() {
        for precision in [0.0, -1e-4, f64::NAN, f64::INFINITY] {
            let config = ConsensusConfig {
                target_precision: precision,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(Error::InvalidPrecision(_))));
        }
    }

    #[test]
    fn rejects_unconnectable_topology() {
        let config = ConsensusConfig {
            node_count: 10,
            edge_count: 5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(Error::Topology(TopologyError::TooFewEdges {
                nodes: 10,
                edges: 5,
                min: 9
            }))
        );
    }

    #[test]
    fn zero_iterations_is_allowed() {
        let config = ConsensusConfig {
            max_iterations: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
