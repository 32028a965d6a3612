//! Run events and topology views for external consumers.

use average_consensus::{ConvergenceResult, CostReport};

use crate::error::Result;
use average_topology::{Graph, NodeId};
use serde::{Deserialize, Serialize};

/// A node as the renderer should draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLabel {
    pub id: NodeId,
    /// `node{id}` over the initial value to two decimals
    pub label: String,
    pub initial_value: f64,
    pub degree: usize,
}

/// Everything a renderer needs to draw the topology before the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyView {
    pub nodes: Vec<NodeLabel>,
    /// Undirected edges as `(a, b)` with `a < b`
    pub edges: Vec<(usize, usize)>,
    pub layout_seed: u64,
}

impl TopologyView {
    /// Label every node of `graph` with its initial value.
    ///
    /// Needs exactly one value per node.
    pub fn new(graph: &Graph, initial_values: &[f64], layout_seed: u64) -> Result<Self> {
        if initial_values.len() != graph.node_count() {
            return Err(average_consensus::Error::ValueCountMismatch {
                expected: graph.node_count(),
                actual: initial_values.len(),
            }
            .into());
        }

        let nodes = graph
            .nodes()
            .map(|id| {
                let value = initial_values[id.index()];
                NodeLabel {
                    id,
                    label: format!("{id}\n{value:.2}"),
                    initial_value: value,
                    degree: graph.degree(id),
                }
            })
            .collect();

        let edges = graph.edges().iter().map(|e| (e.a.index(), e.b.index())).collect();

        Ok(Self {
            nodes,
            edges,
            layout_seed,
        })
    }
}

/// Events that occur during a consensus run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConsensusEvent {
    /// Values seeded, topology fixed
    RunStarted {
        node_count: usize,
        edge_count: usize,
        initial_values: Vec<f64>,
        true_mean: f64,
    },

    /// One broadcast/aggregate round finished
    RoundCompleted {
        iteration: u32,
        values: Vec<f64>,
        max_diff: f64,
    },

    /// The run ended
    Finished {
        result: ConvergenceResult,
        final_values: Vec<f64>,
    },

    /// Final itemized cost
    CostReported { report: CostReport },
}

impl ConsensusEvent {
    /// Round index the event belongs to. Start is round 0.
    pub fn iteration(&self) -> u32 {
        match self {
            ConsensusEvent::RunStarted { .. } => 0,
            ConsensusEvent::RoundCompleted { iteration, .. } => *iteration,
            ConsensusEvent::Finished { result, .. } => result.iterations(),
            ConsensusEvent::CostReported { report } => report
                .line(average_consensus::CostItem::Iterations)
                .map_or(0, |l| l.quantity as u32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_labels_nodes() {
        let graph = Graph::cycle(3).unwrap();
        let view = TopologyView::new(&graph, &[1.0, 22.456, 3.0], 42).unwrap();

        assert_eq!(view.nodes.len(), 3);
        assert_eq!(view.nodes[1].label, "node1\n22.46");
        assert_eq!(view.nodes[1].degree, 2);
        assert_eq!(view.edges, vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(view.layout_seed, 42);
    }

    #[test]
    fn view_needs_one_value_per_node() {
        let graph = Graph::cycle(4).unwrap();
        for values in [&[1.0, 2.0][..], &[1.0; 5][..]] {
            assert!(matches!(
                TopologyView::new(&graph, values, 42),
                Err(crate::Error::Consensus(
                    average_consensus::Error::ValueCountMismatch { expected: 4, .. }
                ))
            ));
        }
    }

    #[test]
    fn event_serialization() {
        let event = ConsensusEvent::RoundCompleted {
            iteration: 3,
            values: vec![1.5, 2.5],
            max_diff: 0.25,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("RoundCompleted"));

        let parsed: ConsensusEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.iteration(), 3);
    }

    #[test]
    fn finished_event_carries_outcome() {
        let event = ConsensusEvent::Finished {
            result: ConvergenceResult::IterationLimitReached { iterations: 50 },
            final_values: vec![],
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("IterationLimitReached"));
        assert_eq!(event.iteration(), 50);
    }
}
