//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initialises logging
//! - parses CLI arguments
//! - runs the sweep/fit pipeline or a single trace
//! - prints text or JSON reports

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, SweepArgs, TraceArgs};
use crate::domain::{FitRange, SweepConfig};
use crate::error::AppError;
use crate::sweep::n0_grid;

pub mod pipeline;

/// Entry point for the `decay` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    // `decay` and `decay --runs 5` behave like `decay sweep ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Sweep(args) => handle_sweep(args),
        Command::Trace(args) => handle_trace(args),
    }
}

/// Log to stderr so stdout stays clean for reports (and `--json`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let config = sweep_config_from_args(&args)?;
    let fit_range = FitRange::new(args.fit_min, args.fit_max)?;

    info!(
        points = config.n0_values.len(),
        runs = config.runs,
        steps = config.steps,
        p = config.decay_probability,
        seed = args.model.seed,
        execution = ?args.execution,
        "running sweep"
    );
    let out = pipeline::run_experiment(&config, args.model.seed, args.execution, fit_range)?;
    info!(
        abs_exponent = out.fit_abs.exponent,
        norm_exponent = out.fit_norm.exponent,
        "fits converged"
    );

    if args.model.json {
        println!("{}", crate::report::to_json(&out)?);
    } else {
        println!("{}", crate::report::format_experiment(&out));
    }
    Ok(())
}

fn handle_trace(args: TraceArgs) -> Result<(), AppError> {
    let m = &args.model;
    info!(n0 = args.n0, p = m.decay_probability, steps = m.steps, seed = m.seed, "simulating trace");
    let trace = pipeline::run_trace(args.n0, m.decay_probability, m.steps, m.rate, m.sampler, m.seed)?;

    if m.json {
        println!("{}", crate::report::to_json(&trace)?);
    } else {
        println!("{}", crate::report::format_trace(&trace));
    }
    Ok(())
}

pub fn sweep_config_from_args(args: &SweepArgs) -> Result<SweepConfig, AppError> {
    let n0_values = match &args.n0 {
        Some(list) => list.clone(),
        None => n0_grid(args.n0_min, args.n0_max, args.n0_points)?,
    };
    Ok(SweepConfig {
        n0_values,
        decay_probability: args.model.decay_probability,
        steps: args.model.steps,
        runs: args.runs,
        rate_model: args.model.rate,
        sampler: args.model.sampler,
    })
}

/// Rewrite argv so `decay` defaults to `decay sweep`.
///
/// Rules:
/// - `decay`                       -> `decay sweep`
/// - `decay --runs 5 ...`          -> `decay sweep --runs 5 ...`
/// - `decay --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("sweep".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "sweep" | "trace");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "sweep flags".
    if arg1.starts_with('-') {
        argv.insert(1, "sweep".to_string());
        return argv;
    }

    argv
}
