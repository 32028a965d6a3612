//! Average Consensus Topology
//!
//! Random, connected, undirected graphs for average consensus simulation.
//!
//! # Model
//!
//! Nodes are dense integer ids `0..N`. A [`Graph`] is immutable once built:
//! undirected, no self-loops, no duplicate edges, with sorted adjacency lists
//! for O(1) id → neighbors lookup.
//!
//! # Generation
//!
//! [`TopologyGenerator`] draws G(n, M) graphs (uniform over simple graphs with
//! exactly M edges) and rejects disconnected draws until one is connected.
//! Connectivity is what makes global agreement reachable at all: a node can
//! only ever average with nodes it has a path to.

mod error;
mod generator;
mod graph;

pub use error::TopologyError;
pub use generator::{GeneratedTopology, TopologyGenerator};
pub use graph::{max_edges, Edge, Graph, NodeId};

/// Default number of nodes in a simulated network.
pub const DEFAULT_NODE_COUNT: usize = 10;

/// Default number of undirected edges in a simulated network.
pub const DEFAULT_EDGE_COUNT: usize = 15;

// The defaults must admit a connected simple graph.
const _: () = assert!(DEFAULT_EDGE_COUNT >= DEFAULT_NODE_COUNT - 1);
const _: () = assert!(DEFAULT_EDGE_COUNT <= max_edges(DEFAULT_NODE_COUNT));

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn defaults_generate() {
        let gen = TopologyGenerator::new(DEFAULT_NODE_COUNT, DEFAULT_EDGE_COUNT).unwrap();
        let topo = gen.generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(topo.graph.node_count(), DEFAULT_NODE_COUNT);
        assert_eq!(topo.graph.edge_count(), DEFAULT_EDGE_COUNT);
    }
}
