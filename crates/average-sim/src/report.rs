//! Reporter and renderer seams, plus the stock implementations.
//!
//! - [`ConsoleReporter`]: human-readable progress and cost report
//! - [`EventRecorder`]: serializable event timeline
//! - [`JsonRenderer`]: topology view as JSON for an external drawing tool

use std::io::Write;

use average_consensus::ConvergenceResult;
use average_topology::Graph;

use crate::error::Result;
use crate::events::{ConsensusEvent, TopologyView};
use crate::simulation::RunSummary;

/// Receives progress from a run.
pub trait Reporter {
    /// Values are seeded and the topology is fixed.
    fn on_start(&mut self, graph: &Graph, initial_values: &[f64], true_mean: f64) -> Result<()>;

    /// A round completed; `values` are the freshly applied values.
    fn on_round(&mut self, iteration: u32, values: &[f64], max_diff: f64) -> Result<()>;

    /// The run ended.
    fn on_finish(&mut self, summary: &RunSummary) -> Result<()>;
}

/// Receives the topology once, before the first round.
pub trait Renderer {
    fn render(&mut self, view: &TopologyView) -> Result<()>;
}

/// Reporter that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReport;

impl Reporter for NoReport {
    fn on_start(&mut self, _: &Graph, _: &[f64], _: f64) -> Result<()> {
        Ok(())
    }

    fn on_round(&mut self, _: u32, _: &[f64], _: f64) -> Result<()> {
        Ok(())
    }

    fn on_finish(&mut self, _: &RunSummary) -> Result<()> {
        Ok(())
    }
}

/// Renderer that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRender;

impl Renderer for NoRender {
    fn render(&mut self, _: &TopologyView) -> Result<()> {
        Ok(())
    }
}

/// Both reporters see every callback, left first.
impl<A: Reporter, B: Reporter> Reporter for (A, B) {
    fn on_start(&mut self, graph: &Graph, initial_values: &[f64], true_mean: f64) -> Result<()> {
        self.0.on_start(graph, initial_values, true_mean)?;
        self.1.on_start(graph, initial_values, true_mean)
    }

    fn on_round(&mut self, iteration: u32, values: &[f64], max_diff: f64) -> Result<()> {
        self.0.on_round(iteration, values, max_diff)?;
        self.1.on_round(iteration, values, max_diff)
    }

    fn on_finish(&mut self, summary: &RunSummary) -> Result<()> {
        self.0.on_finish(summary)?;
        self.1.on_finish(summary)
    }
}

const RULE_WIDTH: usize = 56;

/// Prints progress and the final cost report.
pub struct ConsoleReporter<W> {
    out: W,
    /// Print every node's value after each round
    show_rounds: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, show_rounds: bool) -> Self {
        Self { out, show_rounds }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_values(&mut self, values: &[f64]) -> Result<()> {
        for (i, value) in values.iter().enumerate() {
            writeln!(self.out, "  node{i}: {value:.6}")?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_start(&mut self, graph: &Graph, initial_values: &[f64], true_mean: f64) -> Result<()> {
        writeln!(
            self.out,
            "Topology: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        )?;
        writeln!(self.out, "True mean: {true_mean:.6}")?;
        writeln!(self.out)?;
        writeln!(self.out, "Initial values:")?;
        self.write_values(initial_values)
    }

    fn on_round(&mut self, iteration: u32, values: &[f64], max_diff: f64) -> Result<()> {
        if !self.show_rounds {
            return Ok(());
        }
        writeln!(self.out, "--- Iteration {iteration} (max change {max_diff:.3e}) ---")?;
        self.write_values(values)
    }

    fn on_finish(&mut self, summary: &RunSummary) -> Result<()> {
        match summary.result {
            ConvergenceResult::Converged { iteration } => {
                writeln!(self.out, "Consensus reached at iteration {iteration}")?;
            }
            ConvergenceResult::IterationLimitReached { iterations } => {
                writeln!(
                    self.out,
                    "Iteration limit reached after {iterations} rounds; the network may be too sparse"
                )?;
            }
        }

        writeln!(self.out)?;
        writeln!(self.out, "Result:     {:.6}", summary.final_value)?;
        writeln!(self.out, "True mean:  {:.6}", summary.true_mean)?;
        writeln!(self.out, "Error:      {:.2e}", summary.abs_error)?;
        writeln!(self.out)?;

        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(self.out, "COST REPORT")?;
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(self.out, "{}", summary.cost)?;
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Records the run as a list of [`ConsensusEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Vec<ConsensusEvent>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events.
    pub fn events(&self) -> &[ConsensusEvent] {
        &self.events
    }

    /// Number of events recorded.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Write the timeline as pretty JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.events)?;
        Ok(())
    }
}

impl Reporter for EventRecorder {
    fn on_start(&mut self, graph: &Graph, initial_values: &[f64], true_mean: f64) -> Result<()> {
        self.events.push(ConsensusEvent::RunStarted {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            initial_values: initial_values.to_vec(),
            true_mean,
        });
        Ok(())
    }

    fn on_round(&mut self, iteration: u32, values: &[f64], max_diff: f64) -> Result<()> {
        self.events.push(ConsensusEvent::RoundCompleted {
            iteration,
            values: values.to_vec(),
            max_diff,
        });
        Ok(())
    }

    fn on_finish(&mut self, summary: &RunSummary) -> Result<()> {
        self.events.push(ConsensusEvent::Finished {
            result: summary.result,
            final_values: summary.final_values.clone(),
        });
        self.events.push(ConsensusEvent::CostReported {
            report: summary.cost.clone(),
        });
        Ok(())
    }
}

/// Writes the topology view as JSON.
pub struct JsonRenderer<W> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, view: &TopologyView) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, view)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use average_consensus::{CostLedger, CostModel};

    fn summary(result: ConvergenceResult) -> RunSummary {
        RunSummary {
            result,
            initial_values: vec![10.0, 20.0, 30.0, 40.0],
            final_values: vec![25.0; 4],
            true_mean: 25.0,
            final_value: 25.0,
            abs_error: 0.0,
            spread: 0.0,
            topology_attempts: 1,
            ledger: CostLedger::new(),
            cost: CostModel::default().report(4, &CostLedger::new()),
        }
    }

    fn console_output(result: ConvergenceResult, show_rounds: bool) -> String {
        let graph = Graph::cycle(4).unwrap();
        let mut console = ConsoleReporter::new(Vec::new(), show_rounds);
        console.on_start(&graph, &[10.0, 20.0, 30.0, 40.0], 25.0).unwrap();
        console.on_round(1, &[23.0, 20.0, 30.0, 27.0], 13.3).unwrap();
        console.on_finish(&summary(result)).unwrap();
        String::from_utf8(console.into_inner()).unwrap()
    }

    #[test]
    fn console_reports_convergence() {
        let text = console_output(ConvergenceResult::Converged { iteration: 12 }, true);
        assert!(text.contains("Consensus reached at iteration 12"));
        assert!(text.contains("--- Iteration 1"));
        assert!(text.contains("node3: 40.000000"));
        assert!(text.contains("COST REPORT"));
        assert!(text.contains("1004.00"));
    }

    #[test]
    fn console_reports_limit_distinctly() {
        let text = console_output(ConvergenceResult::IterationLimitReached { iterations: 50 }, false);
        assert!(text.contains("Iteration limit reached after 50 rounds"));
        assert!(!text.contains("Consensus reached"));
        assert!(!text.contains("--- Iteration"));
    }

    #[test]
    fn recorder_keeps_order() {
        let graph = Graph::cycle(4).unwrap();
        let mut recorder = EventRecorder::new();
        recorder.on_start(&graph, &[1.0, 2.0, 3.0, 4.0], 2.5).unwrap();
        recorder.on_round(1, &[2.0, 2.5, 3.0, 2.5], 1.5).unwrap();
        recorder
            .on_finish(&summary(ConvergenceResult::Converged { iteration: 1 }))
            .unwrap();

        assert_eq!(recorder.event_count(), 4);
        let iterations: Vec<u32> = recorder.events().iter().map(|e| e.iteration()).collect();
        assert_eq!(iterations, vec![0, 1, 1, 0]);

        let mut json = Vec::new();
        recorder.write_json(&mut json).unwrap();
        let parsed: Vec<ConsensusEvent> = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed, recorder.events());
    }

    #[test]
    fn pair_fans_out() {
        let graph = Graph::cycle(3).unwrap();
        let mut pair = (EventRecorder::new(), EventRecorder::new());
        pair.on_start(&graph, &[1.0, 2.0, 3.0], 2.0).unwrap();
        assert_eq!(pair.0.event_count(), 1);
        assert_eq!(pair.1.event_count(), 1);
    }

    #[test]
    fn json_renderer_writes_view() {
        let graph = Graph::cycle(3).unwrap();
        let view = TopologyView::new(&graph, &[1.0, 2.0, 3.0], 42).unwrap();
        let mut renderer = JsonRenderer::new(Vec::new());
        renderer.render(&view).unwrap();

        let parsed: TopologyView = serde_json::from_slice(&renderer.into_inner()).unwrap();
        assert_eq!(parsed, view);
    }
}
