//! The round loop: execute rounds until the monitor says stop.

use tracing::{debug, info, warn};

use crate::convergence::{ConvergenceMonitor, ConvergenceResult, Verdict};
use crate::cost::{CostLedger, CostModel, CostReport};
use crate::error::Result;
use crate::round::execute_round;
use crate::state::ConsensusState;

/// What a caller sees after every completed round.
#[derive(Debug, Clone, Copy)]
pub struct RoundSnapshot<'a> {
    /// 1-based index of the round just completed
    pub iteration: u32,
    pub values: &'a [f64],
    pub max_diff: f64,
    /// Counters as of the end of this round
    pub ledger: CostLedger,
}

/// Owns the state and ledger for a single run.
///
/// Nothing here is shared or global: a new engine means a fresh ledger.
#[derive(Debug, Clone)]
pub struct ConsensusEngine {
    state: ConsensusState,
    monitor: ConvergenceMonitor,
    ledger: CostLedger,
}

impl ConsensusEngine {
    pub fn new(state: ConsensusState, monitor: ConvergenceMonitor) -> Self {
        Self {
            state,
            monitor,
            ledger: CostLedger::new(),
        }
    }

    pub fn state(&self) -> &ConsensusState {
        &self.state
    }

    pub fn ledger(&self) -> &CostLedger {
        &self.ledger
    }

    pub fn monitor(&self) -> &ConvergenceMonitor {
        &self.monitor
    }

    /// Run exactly one round, ignoring the monitor. Returns the max change.
    pub fn step(&mut self) -> Result<f64> {
        execute_round(&mut self.state, &mut self.ledger)
    }

    /// Run to convergence or the iteration cap.
    pub fn run(&mut self) -> Result<ConvergenceResult> {
        self.run_with(|_| {})
    }

    /// Run to convergence or the iteration cap, calling `on_round` after each
    /// round with the freshly applied values.
    pub fn run_with<F>(&mut self, mut on_round: F) -> Result<ConvergenceResult>
    where
        F: FnMut(RoundSnapshot<'_>),
    {
        let start = self.ledger.iterations();

        if let Some(result) = self.monitor.exhausted(0) {
            warn!(?result, "iteration cap is zero, no rounds run");
            return Ok(result);
        }

        loop {
            let max_diff = self.step()?;
            let completed = self.ledger.iterations() - start;

            debug!(iteration = completed, max_diff, "round complete");
            on_round(RoundSnapshot {
                iteration: completed,
                values: self.state.values(),
                max_diff,
                ledger: self.ledger,
            });

            if let Verdict::Done(result) = self.monitor.observe(completed, max_diff) {
                match result {
                    ConvergenceResult::Converged { iteration } => {
                        info!(iteration, max_diff, "consensus reached");
                    }
                    ConvergenceResult::IterationLimitReached { iterations } => {
                        warn!(iterations, max_diff, "iteration limit reached without convergence");
                    }
                }
                return Ok(result);
            }
        }
    }

    /// Price everything counted so far.
    pub fn cost_report(&self, model: &CostModel) -> CostReport {
        model.report(self.state.node_count(), &self.ledger)
    }

    /// Final state and counters.
    pub fn into_parts(self) -> (ConsensusState, CostLedger) {
        (self.state, self.ledger)
    }
}
