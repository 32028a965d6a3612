//! Per-node values and neighbor lookup for one run.

use average_topology::{Graph, NodeId};

use crate::error::{Error, Result};

/// A read-only view of one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node<'a> {
    pub id: NodeId,
    pub value: f64,
    pub neighbors: &'a [NodeId],
}

/// Current values plus the fixed id → neighbors lookup.
///
/// Values only change through [`ConsensusState::apply_round`], which replaces
/// the whole vector at once. A half-applied round is never observable.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusState {
    values: Vec<f64>,
    neighbors: Vec<Vec<NodeId>>,
}

impl ConsensusState {
    /// Seed every node of `graph` with its initial value.
    pub fn initialize(values: Vec<f64>, graph: &Graph) -> Result<Self> {
        if values.len() != graph.node_count() {
            return Err(Error::ValueCountMismatch {
                expected: graph.node_count(),
                actual: values.len(),
            });
        }
        if let Some((node, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(Error::NonFiniteValue { node, value });
        }

        let neighbors = graph.nodes().map(|id| graph.neighbors(id).to_vec()).collect();
        Ok(Self { values, neighbors })
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.values.len()
    }

    /// Value of `id` as of the last completed round.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    pub fn current_value(&self, id: NodeId) -> f64 {
        self.values[id.index()]
    }

    /// All values, indexed by node id.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Neighbors of `id`, sorted.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.neighbors[id.index()]
    }

    /// View of a single node.
    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node {
            id,
            value: self.current_value(id),
            neighbors: self.neighbors(id),
        }
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> + '_ {
        (0..self.node_count()).map(|i| self.node(NodeId(i)))
    }

    /// Arithmetic mean of the current values.
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Replace every value at once with the result of a completed round.
    pub fn apply_round(&mut self, new_values: Vec<f64>) -> Result<()> {
        if new_values.len() != self.values.len() {
            return Err(Error::ValueCountMismatch {
                expected: self.values.len(),
                actual: new_values.len(),
            });
        }
        self.values = new_values;
        Ok(())
    }
}
