//! Command-line parsing for the decay RMS experiment.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the simulation/statistics code. Every option falls back to a
//! `DECAY_*` environment variable (a `.env` file is loaded at startup).

use clap::{Args, Parser, Subcommand};

use crate::app::pipeline::Execution;
use crate::domain::{RateModel, Sampler};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "decay",
    version,
    about = "Monte Carlo radioactive decay vs. analytical model: RMS scaling experiment"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sweep N0, aggregate RMS deviation and fit power laws (default).
    Sweep(SweepArgs),
    /// Simulate one trajectory and print it next to the analytical curve.
    Trace(TraceArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    /// Per-step, per-particle decay probability.
    #[arg(short = 'p', long = "decay-probability", env = "DECAY_PROBABILITY", default_value_t = 0.1)]
    pub decay_probability: f64,

    /// Number of time steps per trajectory (including t=0).
    #[arg(long, env = "DECAY_STEPS", default_value_t = 75)]
    pub steps: usize,

    /// Base random seed.
    #[arg(long, env = "DECAY_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Rate used by the analytical curve.
    #[arg(long, value_enum, env = "DECAY_RATE", default_value_t = RateModel::Effective)]
    pub rate: RateModel,

    /// How decays per step are drawn.
    #[arg(long, value_enum, env = "DECAY_SAMPLER", default_value_t = Sampler::Bernoulli)]
    pub sampler: Sampler,

    /// Print JSON instead of text tables.
    #[arg(long)]
    pub json: bool,
}

/// Options for the N0 sweep.
#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Simulation runs per N0.
    #[arg(short = 'n', long, env = "DECAY_RUNS", default_value_t = 20)]
    pub runs: usize,

    /// Smallest N0 in the log-spaced grid.
    #[arg(long, env = "DECAY_N0_MIN", default_value_t = 10)]
    pub n0_min: u64,

    /// Largest N0 in the log-spaced grid.
    #[arg(long, env = "DECAY_N0_MAX", default_value_t = 10_000)]
    pub n0_max: u64,

    /// Grid points before de-duplication.
    #[arg(long, env = "DECAY_N0_POINTS", default_value_t = 20)]
    pub n0_points: usize,

    /// Explicit comma-separated N0 list (overrides the grid).
    #[arg(long, value_delimiter = ',')]
    pub n0: Option<Vec<u64>>,

    /// Lower bound (inclusive) of the N0 range used for fitting.
    #[arg(long, env = "DECAY_FIT_MIN", default_value_t = 100.0)]
    pub fit_min: f64,

    /// Upper bound (inclusive) of the N0 range used for fitting.
    #[arg(long, env = "DECAY_FIT_MAX", default_value_t = 1000.0)]
    pub fit_max: f64,

    /// Parallel (per-run derived seeds) or sequential (one shared stream).
    #[arg(long, value_enum, env = "DECAY_EXECUTION", default_value_t = Execution::Parallel)]
    pub execution: Execution,
}

/// Options for a single trajectory.
#[derive(Debug, Args, Clone)]
pub struct TraceArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Initial population.
    #[arg(long, env = "DECAY_TRACE_N0", default_value_t = 200)]
    pub n0: u64,
}
