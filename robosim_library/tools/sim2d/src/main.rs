//! # sim2d - 2D navigation simulator
//!
//! Usage:
//!   sim2d                                        # Default grid, basic robot, A*
//!   sim2d --algorithm bug2 --env continuous.yaml # Bug2 in a continuous field
//!   sim2d --robot robot.toml --steps 50          # Custom robot, longer budget
//!   sim2d --algorithm rrt --json                 # Print the summary as JSON

use anyhow::{Context, Result};
use clap::Parser;
use sim2d::{PlannerKind, SimConfig, Simulation};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Parser)]
#[command(name = "sim2d")]
#[command(about = "2D navigation simulator for grid and continuous planners")]
pub struct Args {
    /// Environment configuration file (YAML or TOML)
    #[arg(long)]
    env: Option<PathBuf>,

    /// Robot configuration file (YAML or TOML)
    #[arg(long)]
    robot: Option<PathBuf>,

    /// Planner tuning file (YAML or TOML)
    #[arg(long)]
    algorithm_config: Option<PathBuf>,

    /// Planner to run: astar, dijkstra, rrt or bug2
    #[arg(short, long, default_value = "astar")]
    algorithm: String,

    /// Override the step budget
    #[arg(long)]
    steps: Option<usize>,

    /// Seed for obstacle placement and planner randomness
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Record every visited position
    #[arg(long)]
    trace: bool,

    /// Print the summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let algorithm: PlannerKind = args.algorithm.parse()?;

    let mut config = SimConfig::load(
        args.env.as_deref(),
        args.robot.as_deref(),
        args.algorithm_config.as_deref(),
    )?;
    if let Some(steps) = args.steps {
        config.env.steps = steps;
    }
    config.seed = args.seed;
    config.trace_path = args.trace;

    info!("Starting sim2d with {} (seed {})", algorithm, config.seed);
    let mut sim = Simulation::new(config, algorithm).context("failed to set up simulation")?;
    let stats = sim.run();
    stats.log_summary();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }

    Ok(())
}
