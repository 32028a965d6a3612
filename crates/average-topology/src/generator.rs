//! Random connected topologies by rejection sampling.
//!
//! Each attempt draws a uniformly random simple graph with exactly `M` edges
//! over `N` nodes (the Erdős–Rényi G(n, M) model). A disconnected draw is
//! discarded whole and redrawn; it is never repaired. There is no retry cap.
//! The parameter check in [`TopologyGenerator::new`] guarantees a connected
//! draw has non-zero probability, so the loop terminates with probability 1.
//! Disconnection is rare once `M` sits well above the spanning-tree minimum.
//!
//! A draw picks `M` distinct indices out of the `N(N-1)/2` possible pairs and
//! decodes each into its edge, so memory stays O(M) however large `N` is.

use std::collections::BTreeSet;

use rand::seq::index;
use rand::Rng;
use tracing::debug;

use crate::graph::{max_edges, Edge, Graph, NodeId};
use crate::TopologyError;

/// A connected graph together with how many draws it took.
#[derive(Debug, Clone)]
pub struct GeneratedTopology {
    pub graph: Graph,
    /// Total draws, including the accepted one.
    pub attempts: u64,
}

/// Generates connected G(n, M) random graphs.
#[derive(Debug, Clone)]
pub struct TopologyGenerator {
    node_count: usize,
    edge_count: usize,
    /// Number of possible pairs, `N(N-1)/2`
    pairs: usize,
}

/// The `index`-th node pair in colexicographic order:
/// `(0,1), (0,2), (1,2), (0,3), (1,3), (2,3), …`
///
/// Pair `(a, b)` with `a < b` sits at `b(b-1)/2 + a`.
fn pair_at(index: usize) -> Edge {
    // Float estimate of the largest b with b(b-1)/2 <= index, then fixed up
    // exactly in integers.
    let mut b = ((1.0 + (1.0 + 8.0 * index as f64).sqrt()) / 2.0) as usize;
    while b * (b - 1) / 2 > index {
        b -= 1;
    }
    while (b + 1) * b / 2 <= index {
        b += 1;
    }
    let a = index - b * (b - 1) / 2;
    Edge::new(NodeId(a), NodeId(b))
}

impl TopologyGenerator {
    /// Create a generator for `node_count` nodes and exactly `edge_count` edges.
    ///
    /// Requires `node_count >= 1` and
    /// `node_count - 1 <= edge_count <= node_count * (node_count - 1) / 2`.
    pub fn new(node_count: usize, edge_count: usize) -> Result<Self, TopologyError> {
        if node_count == 0 {
            return Err(TopologyError::NoNodes);
        }

        let min = node_count - 1;
        if edge_count < min {
            return Err(TopologyError::TooFewEdges {
                nodes: node_count,
                edges: edge_count,
                min,
            });
        }

        let max = max_edges(node_count);
        if edge_count > max {
            return Err(TopologyError::TooManyEdges {
                nodes: node_count,
                edges: edge_count,
                max,
            });
        }

        Ok(Self {
            node_count,
            edge_count,
            pairs: max,
        })
    }

    /// Node count of generated graphs.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Edge count of generated graphs.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// One G(n, M) draw. The result may be disconnected.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Graph {
        let edges: BTreeSet<Edge> = index::sample(rng, self.pairs, self.edge_count)
            .into_iter()
            .map(pair_at)
            .collect();
        Graph::from_edge_set(self.node_count, edges)
    }

    /// Draw until the graph is connected.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> GeneratedTopology {
        let mut attempts = 0u64;
        loop {
            attempts += 1;
            let graph = self.sample(rng);
            if graph.is_connected() {
                debug!(
                    nodes = self.node_count,
                    edges = self.edge_count,
                    attempts,
                    "generated connected topology"
                );
                return GeneratedTopology { graph, attempts };
            }
            debug!(attempt = attempts, "rejected disconnected topology");
        }
    }
}
