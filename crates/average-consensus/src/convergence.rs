//! Termination: converge, continue, or give up at the iteration cap.

use serde::{Deserialize, Serialize};

use crate::config::ConsensusConfig;

/// How a run ended. Produced exactly once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConvergenceResult {
    /// Max change fell below the target precision on this round (1-based)
    Converged { iteration: u32 },
    /// Ran out of rounds first. Not an error, but not agreement either.
    IterationLimitReached { iterations: u32 },
}

impl ConvergenceResult {
    /// Whether the run converged.
    pub fn is_converged(&self) -> bool {
        matches!(self, ConvergenceResult::Converged { .. })
    }

    /// Rounds completed.
    pub fn iterations(&self) -> u32 {
        match self {
            ConvergenceResult::Converged { iteration } => *iteration,
            ConvergenceResult::IterationLimitReached { iterations } => *iterations,
        }
    }
}

/// Verdict after one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    Done(ConvergenceResult),
}

/// Compares each round's max change to a fixed precision, with a hard cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceMonitor {
    target_precision: f64,
    max_iterations: u32,
}

impl ConvergenceMonitor {
    pub fn new(target_precision: f64, max_iterations: u32) -> Self {
        Self {
            target_precision,
            max_iterations,
        }
    }

    pub fn from_config(config: &ConsensusConfig) -> Self {
        Self::new(config.target_precision, config.max_iterations)
    }

    pub fn target_precision(&self) -> f64 {
        self.target_precision
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Whether the cap is already hit with `completed` rounds done.
    ///
    /// Checked before the first round so that a zero cap runs nothing.
    pub fn exhausted(&self, completed: u32) -> Option<ConvergenceResult> {
        (completed >= self.max_iterations)
            .then_some(ConvergenceResult::IterationLimitReached { iterations: completed })
    }

    /// Judge the round that just brought the total to `completed`.
    ///
    /// Convergence is checked first: converging on the last allowed round
    /// counts as converging.
    pub fn observe(&self, completed: u32, max_diff: f64) -> Verdict {
        if max_diff < self.target_precision {
            return Verdict::Done(ConvergenceResult::Converged { iteration: completed });
        }
        match self.exhausted(completed) {
            Some(result) => Verdict::Done(result),
            None => Verdict::Continue,
        }
    }
}

impl Default for ConvergenceMonitor {
    fn default() -> Self {
        Self::from_config(&ConsensusConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_precision_converges() {
        let monitor = ConvergenceMonitor::default();
        assert_eq!(
            monitor.observe(7, 5e-5),
            Verdict::Done(ConvergenceResult::Converged { iteration: 7 })
        );
    }

    #[test]
    fn exactly_at_precision_continues() {
        let monitor = ConvergenceMonitor::new(1e-4, 50);
        assert_eq!(monitor.observe(3, 1e-4), Verdict::Continue);
    }

    #[test]
    fn cap_stops_the_run() {
        let monitor = ConvergenceMonitor::new(1e-4, 50);
        assert_eq!(monitor.observe(49, 0.5), Verdict::Continue);
        assert_eq!(
            monitor.observe(50, 0.5),
            Verdict::Done(ConvergenceResult::IterationLimitReached { iterations: 50 })
        );
    }

    #[test]
    fn converging_on_last_round_is_convergence() {
        let monitor = ConvergenceMonitor::new(1e-4, 50);
        assert_eq!(
            monitor.observe(50, 1e-6),
            Verdict::Done(ConvergenceResult::Converged { iteration: 50 })
        );
    }

    #[test]
    fn zero_cap_is_exhausted_up_front() {
        let monitor = ConvergenceMonitor::new(1e-4, 0);
        assert_eq!(
            monitor.exhausted(0),
            Some(ConvergenceResult::IterationLimitReached { iterations: 0 })
        );
        assert_eq!(ConvergenceMonitor::default().exhausted(0), None);
    }

    #[test]
    fn nan_metric_never_converges() {
        let monitor = ConvergenceMonitor::new(1e-4, 10);
        assert_eq!(monitor.observe(1, f64::NAN), Verdict::Continue);
    }

    #[test]
    fn result_accessors() {
        let done = ConvergenceResult::Converged { iteration: 12 };
        assert!(done.is_converged());
        assert_eq!(done.iterations(), 12);

        let capped = ConvergenceResult::IterationLimitReached { iterations: 50 };
        assert!(!capped.is_converged());
        assert_eq!(capped.iterations(), 50);
    }
}
