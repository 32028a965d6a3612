//! Average Consensus Simulator
//!
//! Run one consensus experiment and print the progress and cost report.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use average_consensus::{ConsensusConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TARGET_PRECISION};
use average_sim::{
    ConsoleReporter, EventRecorder, JsonRenderer, NoRender, Renderer, Simulation, SimulationConfig,
};
use average_topology::{DEFAULT_EDGE_COUNT, DEFAULT_NODE_COUNT};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "average-sim", version, about = "Distributed average consensus simulator")]
struct Cli {
    /// Number of nodes
    #[arg(short = 'n', long, default_value_t = DEFAULT_NODE_COUNT)]
    nodes: usize,

    /// Number of undirected edges
    #[arg(short = 'e', long, default_value_t = DEFAULT_EDGE_COUNT)]
    edges: usize,

    /// Converged once no value moves more than this in a round
    #[arg(short = 'p', long, default_value_t = DEFAULT_TARGET_PRECISION)]
    precision: f64,

    /// Hard stop on rounds
    #[arg(short = 'i', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: u32,

    /// RNG seed (random when omitted)
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Write the topology view as JSON to this file
    #[arg(long)]
    topology_out: Option<PathBuf>,

    /// Write the event timeline as JSON to this file
    #[arg(long)]
    events_out: Option<PathBuf>,

    /// Skip per-round value tables
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "average_sim=info,average_consensus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "starting simulation");

    let config = SimulationConfig {
        consensus: ConsensusConfig {
            node_count: cli.nodes,
            edge_count: cli.edges,
            target_precision: cli.precision,
            max_iterations: cli.max_iterations,
        },
        seed,
        ..Default::default()
    };
    let mut sim = Simulation::new(config)?;

    let mut renderer: Box<dyn Renderer> = match &cli.topology_out {
        Some(path) => Box::new(JsonRenderer::new(BufWriter::new(File::create(path)?))),
        None => Box::new(NoRender),
    };

    let console = ConsoleReporter::new(io::stdout().lock(), !cli.quiet);
    let mut reporters = (console, EventRecorder::new());
    let summary = sim.run(&mut reporters, renderer.as_mut())?;

    if let Some(path) = &cli.events_out {
        reporters.1.write_json(BufWriter::new(File::create(path)?))?;
        tracing::info!(path = %path.display(), events = reporters.1.event_count(), "event timeline written");
    }

    if !summary.result.is_converged() {
        tracing::warn!(iterations = summary.result.iterations(), "finished without consensus");
    }

    Ok(())
}
