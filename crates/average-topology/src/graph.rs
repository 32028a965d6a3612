//! Undirected simple graph over dense node ids.
//!
//! Nodes are numbered `0..node_count` so every lookup (id → neighbors) is a
//! direct index. Edges are stored normalized (`a < b`) and the adjacency lists
//! are kept sorted, which keeps neighbor iteration order deterministic.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use crate::TopologyError;

/// A node identifier, dense in `0..node_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

impl NodeId {
    /// The id as a vector index.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node{}", self.0)
    }
}

/// An undirected edge, normalized so that `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
}

impl Edge {
    /// Create a normalized edge. Endpoint order does not matter.
    pub fn new(x: NodeId, y: NodeId) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    /// Whether both endpoints are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.a == self.b
    }
}

/// Maximum number of edges in a simple graph on `node_count` nodes.
pub const fn max_edges(node_count: usize) -> usize {
    node_count * node_count.saturating_sub(1) / 2
}

/// An immutable undirected simple graph.
///
/// Invariants (checked at construction):
/// - no self-loops
/// - no duplicate edges
/// - every endpoint is `< node_count`
///
/// With the `serde` feature a graph travels as its node count and edge list;
/// deserializing rebuilds it through [`Graph::from_edges`], so the same
/// checks apply.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "EdgeList", into = "EdgeList")
)]
pub struct Graph {
    node_count: usize,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<NodeId>>,
}

impl Graph {
    /// Build a graph from an explicit edge list.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self, TopologyError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut seen = BTreeSet::new();

        for (x, y) in edges {
            if x >= node_count || y >= node_count {
                return Err(TopologyError::NodeOutOfRange {
                    node: x.max(y),
                    node_count,
                });
            }
            let edge = Edge::new(NodeId(x), NodeId(y));
            if edge.is_self_loop() {
                return Err(TopologyError::SelfLoop { node: x });
            }
            if !seen.insert(edge) {
                return Err(TopologyError::DuplicateEdge {
                    a: edge.a.0,
                    b: edge.b.0,
                });
            }
        }

        Ok(Self::from_edge_set(node_count, seen))
    }

    /// Build from an already-validated, normalized edge set.
    pub(crate) fn from_edge_set(node_count: usize, edges: BTreeSet<Edge>) -> Self {
        let mut adjacency = vec![Vec::new(); node_count];
        for edge in &edges {
            adjacency[edge.a.0].push(edge.b);
            adjacency[edge.b.0].push(edge.a);
        }
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
        }

        Self {
            node_count,
            edges: edges.into_iter().collect(),
            adjacency,
        }
    }

    /// A ring `0 – 1 – … – (n-1) – 0`. Needs at least 3 nodes to be simple.
    pub fn cycle(node_count: usize) -> Result<Self, TopologyError> {
        Self::from_edges(node_count, (0..node_count).map(|i| (i, (i + 1) % node_count)))
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All edges, sorted.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Iterate node ids in order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.node_count).map(NodeId)
    }

    /// Sorted neighbors of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not in the graph.
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.adjacency[node.index()]
    }

    /// Number of neighbors of `node`.
    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// Whether `a` and `b` share an edge.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        a.index() < self.node_count && self.adjacency[a.index()].binary_search(&b).is_ok()
    }

    /// Number of directed edges, i.e. messages one broadcast phase sends.
    pub fn directed_edge_count(&self) -> usize {
        2 * self.edges.len()
    }

    /// Whether a path exists between every pair of nodes.
    ///
    /// Breadth-first search from node 0. A graph with zero or one node is connected.
    pub fn is_connected(&self) -> bool {
        if self.node_count <= 1 {
            return true;
        }

        let mut visited = vec![false; self.node_count];
        let mut queue = VecDeque::from([NodeId(0)]);
        visited[0] = true;
        let mut reached = 1;

        while let Some(node) = queue.pop_front() {
            for &next in self.neighbors(node) {
                if !visited[next.index()] {
                    visited[next.index()] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }

        reached == self.node_count
    }
}

/// Wire form of a [`Graph`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct EdgeList {
    node_count: usize,
    edges: Vec<(usize, usize)>,
}

#[cfg(feature = "serde")]
impl TryFrom<EdgeList> for Graph {
    type Error = TopologyError;

    fn try_from(list: EdgeList) -> Result<Self, Self::Error> {
        Graph::from_edges(list.node_count, list.edges)
    }
}

#[cfg(feature = "serde")]
impl From<Graph> for EdgeList {
    fn from(graph: Graph) -> Self {
        Self {
            node_count: graph.node_count,
            edges: graph.edges.iter().map(|e| (e.a.0, e.b.0)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_is_normalized() {
        let e = Edge::new(NodeId(5), NodeId(2));
        assert_eq!(e.a, NodeId(2));
        assert_eq!(e.b, NodeId(5));
        assert_eq!(e, Edge::new(NodeId(2), NodeId(5)));
    }

    #[test]
    fn max_edges_small_values() {
        assert_eq!(max_edges(0), 0);
        assert_eq!(max_edges(1), 0);
        assert_eq!(max_edges(2), 1);
        assert_eq!(max_edges(4), 6);
        assert_eq!(max_edges(10), 45);
    }

    #[test]
    fn cycle_adjacency() {
        let g = Graph::cycle(4).unwrap();
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.neighbors(NodeId(0)), &[NodeId(1), NodeId(3)]);
        assert_eq!(g.neighbors(NodeId(2)), &[NodeId(1), NodeId(3)]);
        assert_eq!(g.directed_edge_count(), 8);
        assert!(g.is_connected());
    }

    #[test]
    fn rejects_self_loop() {
        let err = Graph::from_edges(3, [(0, 1), (2, 2)]).unwrap_err();
        assert!(matches!(err, TopologyError::SelfLoop { node: 2 }));
    }

    #[test]
    fn rejects_duplicate_in_either_direction() {
        let err = Graph::from_edges(3, [(0, 1), (1, 0)]).unwrap_err();
        assert!(matches!(err, TopologyError::DuplicateEdge { a: 0, b: 1 }));
    }

    #[test]
    fn rejects_out_of_range_endpoint() {
        let err = Graph::from_edges(3, [(0, 3)]).unwrap_err();
        assert!(matches!(
            err,
            TopologyError::NodeOutOfRange { node: 3, node_count: 3 }
        ));
    }

    #[test]
    fn isolated_node_is_disconnected() {
        // Node 5 has no edges.
        let edges = [(0, 1), (1, 2), (2, 3), (3, 4), (4, 6), (6, 7), (7, 8), (8, 9)];
        let g = Graph::from_edges(10, edges).unwrap();
        assert_eq!(g.degree(NodeId(5)), 0);
        assert!(!g.is_connected());
    }

    #[test]
    fn trivial_graphs_are_connected() {
        let none: [(usize, usize); 0] = [];
        assert!(Graph::from_edges(0, none).unwrap().is_connected());
        assert!(Graph::from_edges(1, none).unwrap().is_connected());
        assert!(!Graph::from_edges(2, none).unwrap().is_connected());
    }

    #[test]
    fn has_edge_is_symmetric() {
        let g = Graph::from_edges(3, [(0, 2)]).unwrap();
        assert!(g.has_edge(NodeId(0), NodeId(2)));
        assert!(g.has_edge(NodeId(2), NodeId(0)));
        assert!(!g.has_edge(NodeId(0), NodeId(1)));
        assert!(!g.has_edge(NodeId(7), NodeId(0)));
    }

    #[test]
    fn node_id_display() {
        assert_eq!(NodeId(3).to_string(), "node3");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_goes_through_edge_list() {
        let g = Graph::cycle(4).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, r#"{"node_count":4,"edges":[[0,1],[0,3],[1,2],[2,3]]}"#);
        assert_eq!(serde_json::from_str::<Graph>(&json).unwrap(), g);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_rejects_invalid_graphs() {
        for json in [
            r#"{"node_count":3,"edges":[[0,5]]}"#,
            r#"{"node_count":3,"edges":[[1,1]]}"#,
            r#"{"node_count":3,"edges":[[0,1],[1,0]]}"#,
        ] {
            assert!(serde_json::from_str::<Graph>(json).is_err(), "accepted {json}");
        }
    }
}
