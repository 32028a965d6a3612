//! Simulation configuration.

use average_consensus::{ConsensusConfig, CostModel};
use serde::{Deserialize, Serialize};

/// Fixed seed for the renderer's layout, so drawings are stable across runs.
pub const LAYOUT_SEED: u64 = 42;

/// Configuration for the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Topology size, precision and iteration cap
    pub consensus: ConsensusConfig,
    /// Seed for deterministic simulation
    pub seed: u64,
    /// Initial values are drawn uniformly from `[min_value, max_value)`
    pub min_value: f64,
    pub max_value: f64,
    /// Unit prices for the cost report
    pub cost_model: CostModel,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            consensus: ConsensusConfig::default(),
            seed: 42,
            min_value: 0.0,
            max_value: 100.0,
            cost_model: CostModel::default(),
        }
    }
}
