//! Average Consensus Simulation
//!
//! Runs a complete average consensus experiment and hands the results to
//! pluggable collaborators.
//!
//! # Architecture
//!
//! - **Simulation**: seeds private values, builds a connected random topology,
//!   drives the round loop until convergence or the iteration cap
//! - **Renderer**: receives the topology view (edges, labels, layout seed) once
//! - **Reporter**: receives the start state, every round, and the final summary
//!
//! # Usage
//!
//! ```ignore
//! let mut sim = Simulation::new(SimulationConfig::default())?;
//! let mut console = ConsoleReporter::new(std::io::stdout(), true);
//! let summary = sim.run(&mut console, &mut NoRender)?;
//! println!("converged: {}", summary.result.is_converged());
//! ```

mod config;
mod error;
mod events;
mod report;
mod simulation;

pub use config::{SimulationConfig, LAYOUT_SEED};
pub use error::{Error, Result};
pub use events::{ConsensusEvent, NodeLabel, TopologyView};
pub use report::{ConsoleReporter, EventRecorder, JsonRenderer, NoRender, NoReport, Renderer, Reporter};
pub use simulation::{RunSummary, Simulation};
