//! Consensus run driver: seed values, build the topology, run rounds, report.

use average_consensus::{
    ConsensusEngine, ConsensusState, ConvergenceMonitor, ConvergenceResult, CostLedger, CostReport,
};
use average_topology::Graph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{SimulationConfig, LAYOUT_SEED};
use crate::error::{Error, Result};
use crate::events::TopologyView;
use crate::report::{Renderer, Reporter};

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub result: ConvergenceResult,
    pub initial_values: Vec<f64>,
    pub final_values: Vec<f64>,
    /// Mean of the initial values
    pub true_mean: f64,
    /// Value held by node 0 at the end
    pub final_value: f64,
    /// `|final_value - true_mean|`
    pub abs_error: f64,
    /// Largest minus smallest final value
    pub spread: f64,
    /// Topology draws needed to get a connected graph (1 for fixed graphs)
    pub topology_attempts: u64,
    pub ledger: CostLedger,
    pub cost: CostReport,
}

/// Drives one consensus run end to end.
pub struct Simulation {
    config: SimulationConfig,
    rng: StdRng,
}

impl Simulation {
    /// Create a new simulation with the given configuration.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.consensus.validate()?;
        let (min, max) = (config.min_value, config.max_value);
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(Error::InvalidValueRange { min, max });
        }

        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Draw one private value per node.
    pub fn initial_values(&mut self) -> Vec<f64> {
        let range = self.config.min_value..self.config.max_value;
        (0..self.config.consensus.node_count)
            .map(|_| self.rng.gen_range(range.clone()))
            .collect()
    }

    /// Generate values and a random connected topology, then run.
    pub fn run<P, R>(&mut self, reporter: &mut P, renderer: &mut R) -> Result<RunSummary>
    where
        P: Reporter + ?Sized,
        R: Renderer + ?Sized,
    {
        let values = self.initial_values();
        let generator = self.config.consensus.generator()?;
        let topology = generator.generate(&mut self.rng);
        info!(
            nodes = topology.graph.node_count(),
            edges = topology.graph.edge_count(),
            attempts = topology.attempts,
            "topology ready"
        );

        self.run_on(&topology.graph, values, topology.attempts, reporter, renderer)
    }

    /// Run on a caller-supplied graph and initial values.
    ///
    /// The graph is used as-is; a disconnected graph simply never agrees
    /// globally and runs to the iteration cap.
    pub fn run_on<P, R>(
        &mut self,
        graph: &Graph,
        initial_values: Vec<f64>,
        topology_attempts: u64,
        reporter: &mut P,
        renderer: &mut R,
    ) -> Result<RunSummary>
    where
        P: Reporter + ?Sized,
        R: Renderer + ?Sized,
    {
        let state = ConsensusState::initialize(initial_values.clone(), graph)?;
        renderer.render(&TopologyView::new(graph, &initial_values, LAYOUT_SEED)?)?;

        let true_mean = state.mean();
        reporter.on_start(graph, &initial_values, true_mean)?;

        let monitor = ConvergenceMonitor::from_config(&self.config.consensus);
        let mut engine = ConsensusEngine::new(state, monitor);

        // Per-round reporting cannot bail out of the engine loop; keep the
        // first failure and surface it once the run ends.
        let mut report_err = None;
        let result = engine.run_with(|snap| {
            if report_err.is_none() {
                if let Err(e) = reporter.on_round(snap.iteration, snap.values, snap.max_diff) {
                    report_err = Some(e);
                }
            }
        })?;
        if let Some(e) = report_err {
            return Err(e);
        }

        let cost = engine.cost_report(&self.config.cost_model);
        let (state, ledger) = engine.into_parts();
        let final_values = state.values().to_vec();
        let final_value = final_values.first().copied().unwrap_or(true_mean);
        let (lo, hi) = final_values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

        let summary = RunSummary {
            result,
            initial_values,
            final_values,
            true_mean,
            final_value,
            abs_error: (final_value - true_mean).abs(),
            spread: if hi >= lo { hi - lo } else { 0.0 },
            topology_attempts,
            ledger,
            cost,
        };
        debug!(abs_error = summary.abs_error, spread = summary.spread, "run summary");

        reporter.on_finish(&summary)?;
        Ok(summary)
    }
}
