//! Schelling segregation runner
//!
//! Runs one simulation on a configured topology until every agent is happy or
//! the move budget is spent, then reports the outcome.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use schelling_core::output::{generate_snapshot, write_snapshot, Metrics, MoveLogger};
use schelling_core::{Config, RunSummary, Simulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "schelling")]
#[command(about = "Schelling segregation dynamics on a graph")]
struct Args {
    /// TOML config file (defaults to schelling.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Fraction of nodes occupied, in (0, 1)
    #[arg(long)]
    density: Option<f64>,

    /// Fraction of agents in the minority population
    #[arg(long)]
    minority_fraction: Option<f64>,

    /// Homophily threshold in [0, 1]
    #[arg(long)]
    threshold: Option<f64>,

    /// Move budget (0 = unbounded)
    #[arg(long)]
    max_moves: Option<u64>,

    /// Write every move as a JSON line to this file
    #[arg(long)]
    move_log: Option<PathBuf>,

    /// Write the final grid state as JSON to this file
    #[arg(long)]
    output_final_state: Option<PathBuf>,

    /// Print the run summary as a single JSON line instead of text
    #[arg(long)]
    summary_json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_or_default(),
    };
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(density) = args.density {
        config.simulation.density = density;
    }
    if let Some(fraction) = args.minority_fraction {
        config.simulation.minority_fraction = fraction;
    }
    if let Some(threshold) = args.threshold {
        config.simulation.homophily_threshold = threshold;
    }
    if let Some(max_moves) = args.max_moves {
        config.run.max_moves = max_moves;
    }

    let topology = config.topology.build()?;
    tracing::info!(
        nodes = topology.node_count(),
        edges = topology.edge_count(),
        "topology ready"
    );

    let mut sim = Simulation::new(topology, &config.simulation)?;
    let initial = Metrics::measure(&sim);
    tracing::info!(
        agents = sim.total_agent_count(),
        minority = sim.minority_count(),
        unhappy = initial.unhappy,
        seed = config.simulation.seed,
        "population placed"
    );

    let progress = config.run.progress();
    let report = match &args.move_log {
        Some(path) => {
            let mut logger = MoveLogger::new(path)?;
            let report =
                sim.run_with(config.run.max_moves, &progress, |record| logger.log(record))?;
            logger.flush()?;
            tracing::info!(records = logger.record_count(), "Wrote {}", path.display());
            report
        }
        None => sim.run(config.run.max_moves, &progress)?,
    };

    let final_metrics = Metrics::measure(&sim);
    let params = sim.params();
    let summary = RunSummary {
        seed: params.seed,
        node_count: sim.topology().node_count(),
        total_agents: sim.total_agent_count(),
        minority_agents: sim.minority_count(),
        density: params.density,
        minority_fraction: params.minority_fraction,
        homophily_threshold: params.homophily_threshold,
        moves: sim.move_count(),
        converged: report.converged,
        initial_unhappy: initial.unhappy,
        final_unhappy: final_metrics.unhappy,
        initial_avg_same: initial.avg_same,
        final_avg_same: final_metrics.avg_same,
        elapsed_secs: report.elapsed_secs,
    };

    if let Some(path) = &args.output_final_state {
        write_snapshot(path, &generate_snapshot(&sim, "final"))?;
        tracing::info!("Wrote {}", path.display());
    }

    if args.summary_json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("Schelling Segregation");
    println!("=====================");
    println!("Seed: {}", summary.seed);
    println!(
        "Agents: {} on {} nodes ({} minority)",
        summary.total_agents, summary.node_count, summary.minority_agents
    );
    println!("Threshold: {}", summary.homophily_threshold);
    println!();
    if summary.converged {
        println!("Converged after {} moves.", summary.moves);
    } else {
        println!(
            "Did not converge within {} moves ({:.3}% still unhappy).",
            summary.moves,
            100.0 * summary.final_unhappy_fraction()
        );
    }
    println!(
        "Unhappy: {} -> {}",
        summary.initial_unhappy, summary.final_unhappy
    );
    println!(
        "Average same-type fraction: {:.4} -> {:.4}",
        summary.initial_avg_same, summary.final_avg_same
    );
    println!("Elapsed: {:.3}s", summary.elapsed_secs);
}
