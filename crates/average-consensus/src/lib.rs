//! Synchronous Average Consensus
//!
//! Every node holds a private scalar. Nodes repeatedly swap values with their
//! graph neighbors and replace their own value with the local mean. On a
//! connected graph all values are driven to a common limit without any node
//! seeing the whole dataset.
//!
//! # Round Protocol
//!
//! 1. **Broadcast**: each node sends its pre-round value to every neighbor
//! 2. **Aggregate**: each node averages its own value with what it received
//! 3. **Check**: the largest per-node change is compared to the target precision
//!
//! Broadcast fully completes before aggregation starts. A node never sees a
//! neighbor's in-progress value, so the result does not depend on node order.
//!
//! # Weighting Caveat
//!
//! Each node divides by its own `1 + received` count. On regular graphs this
//! preserves the global sum exactly. On irregular graphs it does not: nodes
//! still agree asymptotically, but the common value may differ from the true
//! initial mean. See [`round`] for details.
//!
//! # Accounting
//!
//! A [`CostLedger`] counts messages (one per directed edge per round),
//! arithmetic operations and rounds. [`CostModel`] turns it into an itemized
//! [`CostReport`].

mod config;
mod convergence;
mod cost;
mod engine;
mod error;
mod message;
pub mod round;
mod state;

pub use config::{ConsensusConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TARGET_PRECISION};
pub use convergence::{ConvergenceMonitor, ConvergenceResult, Verdict};
pub use cost::{CostItem, CostLedger, CostLine, CostModel, CostReport};
pub use engine::{ConsensusEngine, RoundSnapshot};
pub use error::{Error, Result};
pub use message::{MalformedMessage, Message};
pub use round::{aggregate, broadcast, execute_round, Round, RoundOutcome};
pub use state::{ConsensusState, Node};

pub use average_topology::{Graph, NodeId};
