//! Error types for topology construction.

use thiserror::Error;

/// Errors raised while building or generating a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// A graph needs at least one node.
    #[error("node count must be at least 1")]
    NoNodes,

    /// Fewer edges than a spanning tree needs; no draw could ever be connected.
    #[error("{edges} edges cannot connect {nodes} nodes (need at least {min})")]
    TooFewEdges { nodes: usize, edges: usize, min: usize },

    /// More edges than a simple graph on this many nodes can hold.
    #[error("{edges} edges exceed the simple-graph maximum of {max} for {nodes} nodes")]
    TooManyEdges { nodes: usize, edges: usize, max: usize },

    /// An edge endpoint is not a node of the graph.
    #[error("node {node} out of range for graph with {node_count} nodes")]
    NodeOutOfRange { node: usize, node_count: usize },

    /// An edge connects a node to itself.
    #[error("self-loop on node {node}")]
    SelfLoop { node: usize },

    /// The same undirected edge appears twice.
    #[error("duplicate edge {a}-{b}")]
    DuplicateEdge { a: usize, b: usize },
}
