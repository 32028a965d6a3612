//! One synchronous broadcast/aggregate round.
//!
//! # Phases
//!
//! 1. **Broadcast**: every node sends its pre-round value to every neighbor.
//!    All sends land in a round-scoped buffer before anyone reads, so no node
//!    can observe a neighbor's new value mid-round.
//! 2. **Aggregate**: every node averages its own value with whatever it
//!    received and decoded. Malformed payloads are dropped from the set.
//!
//! The new vector is handed back whole and applied atomically by
//! [`ConsensusState::apply_round`].
//!
//! # Weighting
//!
//! Each node divides by `1 + received`, its own local count. That is a plain
//! local mean, not a doubly-stochastic weighting: on irregular graphs the sum
//! of all values is not preserved exactly from round to round, and the common
//! limit can drift from the true initial mean. All nodes still agree in the
//! limit on a connected graph. The rule is kept as-is for compatibility.

use average_topology::NodeId;
use tracing::trace;

use crate::cost::CostLedger;
use crate::error::Result;
use crate::message::Message;
use crate::state::ConsensusState;

/// Buffers for one round: per-node outgoing value and receive inbox.
///
/// Indexed by node id. Dropped after aggregation.
#[derive(Debug, Clone)]
pub struct Round {
    outgoing: Vec<f64>,
    inboxes: Vec<Vec<Message>>,
}

impl Round {
    fn new(node_count: usize) -> Self {
        Self {
            outgoing: Vec::with_capacity(node_count),
            inboxes: vec![Vec::new(); node_count],
        }
    }

    /// Value `id` broadcast this round.
    pub fn outgoing(&self, id: NodeId) -> f64 {
        self.outgoing[id.index()]
    }

    /// Messages waiting for `id`.
    pub fn inbox(&self, id: NodeId) -> &[Message] {
        &self.inboxes[id.index()]
    }

    /// Put a message into `to`'s inbox.
    pub fn deliver(&mut self, to: NodeId, message: Message) {
        self.inboxes[to.index()].push(message);
    }

    /// Remove the first message in `to`'s inbox matching `predicate`.
    pub fn withdraw<F>(&mut self, to: NodeId, predicate: F) -> Option<Message>
    where
        F: Fn(&Message) -> bool,
    {
        let inbox = &mut self.inboxes[to.index()];
        let pos = inbox.iter().position(predicate)?;
        Some(inbox.remove(pos))
    }
}

/// Result of aggregating one round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    /// Next value of every node, indexed by id
    pub new_values: Vec<f64>,
    /// Largest `|new - old|` across nodes: the convergence metric
    pub max_diff: f64,
    /// Payloads dropped as malformed
    pub dropped: usize,
}

/// Broadcast phase: fill every neighbor's inbox with each node's current value.
///
/// Counts one message per directed edge.
pub fn broadcast(state: &ConsensusState, ledger: &mut CostLedger) -> Round {
    let mut round = Round::new(state.node_count());
    let mut sent = 0u64;

    for node in state.nodes() {
        round.outgoing.push(node.value);
        for &neighbor in node.neighbors {
            round.deliver(neighbor, Message::with_value(node.id, node.value));
            sent += 1;
        }
    }

    ledger.record_messages(sent);
    round
}

/// Aggregate phase: each node's next value is the mean of its own value and
/// every decodable value it received.
///
/// Arithmetic per node with `r` accepted values: `r` decodes, `r` additions
/// and one division.
pub fn aggregate(state: &ConsensusState, round: Round, ledger: &mut CostLedger) -> RoundOutcome {
    let mut new_values = Vec::with_capacity(state.node_count());
    let mut max_diff = 0.0f64;
    let mut dropped = 0;

    for (i, inbox) in round.inboxes.into_iter().enumerate() {
        let own = state.current_value(NodeId(i));
        let mut sum = own;
        let mut accepted = 0u64;

        for message in &inbox {
            match message.decode() {
                Ok(value) => {
                    sum += value;
                    accepted += 1;
                }
                Err(err) => {
                    trace!(node = i, %err, "dropping malformed message");
                    dropped += 1;
                }
            }
        }

        let count = accepted + 1;
        let next = sum / count as f64;
        ledger.record_arithmetic(accepted + (count - 1) + 1);

        max_diff = max_diff.max((next - own).abs());
        new_values.push(next);
    }

    RoundOutcome {
        new_values,
        max_diff,
        dropped,
    }
}

/// Run both phases and apply the result. Returns the round's max change.
pub fn execute_round(state: &mut ConsensusState, ledger: &mut CostLedger) -> Result<f64> {
    let round = broadcast(state, ledger);
    let outcome = aggregate(state, round, ledger);
    state.apply_round(outcome.new_values)?;
    ledger.record_iteration();
    Ok(outcome.max_diff)
}
