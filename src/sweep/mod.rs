//! Parameter sweep over initial populations.
//!
//! Responsibilities:
//!
//! - validate the sweep configuration up front
//! - evaluate the analytical curve once per `N0`
//! - simulate `runs` trajectories per `N0` (parallel, one seeded generator per run)
//! - aggregate absolute and normalized RMS, assembled into index-aligned sequences
//!
//! Any failure aborts the whole sweep: the fitter assumes complete, aligned
//! sequences, so a partially filled result is never returned.

pub mod grid;

pub use grid::*;

use rand::Rng;
use rayon::prelude::*;

use crate::data::{run_rng, simulate_decay};
use crate::domain::{PointResult, SweepConfig, SweepResult, Trajectory};
use crate::error::SimError;
use crate::models::analytical_decay;
use crate::stats::{compute_rms_over_curve, normalize};

/// Check a sweep configuration before doing any work.
pub fn validate_config(config: &SweepConfig) -> Result<(), SimError> {
    if config.n0_values.is_empty() {
        return Err(SimError::invalid("n0_values", "sweep needs at least one N0"));
    }
    if let Some(&n0) = config.n0_values.iter().find(|&&n| n == 0) {
        return Err(SimError::invalid(
            "n0_values",
            format!("N0 must be > 0 for normalization, got {n0}"),
        ));
    }
    for w in config.n0_values.windows(2) {
        if w[1] <= w[0] {
            return Err(SimError::invalid(
                "n0_values",
                format!("must be strictly increasing, got {} then {}", w[0], w[1]),
            ));
        }
    }
    // Per-point parameters only differ in N0.
    config.parameters(config.n0_values[0]).validate()
}

/// Run the sweep in parallel and return per-point results (in `N0` order).
///
/// Run `r` of point `n0` draws from `run_rng(seed, n0, r)`, so the output is
/// identical for a given seed no matter how the work is scheduled.
pub fn run_sweep_points(config: &SweepConfig, seed: u64) -> Result<Vec<PointResult>, SimError> {
    validate_config(config)?;
    config
        .n0_values
        .par_iter()
        .map(|&n0| evaluate_point(n0, config, seed))
        .collect()
}

/// Run the sweep in parallel and return the aligned sequences.
pub fn run_sweep(config: &SweepConfig, seed: u64) -> Result<SweepResult, SimError> {
    let points = run_sweep_points(config, seed)?;
    Ok(SweepResult::from_points(&points))
}

/// Evaluate one sweep point with per-run derived seeds.
pub fn evaluate_point(n0: u64, config: &SweepConfig, seed: u64) -> Result<PointResult, SimError> {
    let theory = analytical_decay(n0, config.decay_probability, config.steps, config.rate_model);
    let runs: Vec<Trajectory> = (0..config.runs)
        .into_par_iter()
        .map(|r| {
            let mut rng = run_rng(seed, n0, r);
            simulate_decay(n0, config.decay_probability, config.steps, config.sampler, &mut rng)
        })
        .collect::<Result<Vec<_>, SimError>>()?;

    aggregate_point(n0, &runs, &theory)
}

/// Sequential sweep sharing one random stream across every run, in order.
///
/// Slower than `run_sweep`, but reproduces a single-stream experiment exactly.
pub fn run_sweep_with_rng<R: Rng + ?Sized>(
    config: &SweepConfig,
    rng: &mut R,
) -> Result<SweepResult, SimError> {
    validate_config(config)?;

    let mut points = Vec::with_capacity(config.n0_values.len());
    for &n0 in &config.n0_values {
        let theory = analytical_decay(n0, config.decay_probability, config.steps, config.rate_model);
        let mut runs = Vec::with_capacity(config.runs);
        for _ in 0..config.runs {
            runs.push(simulate_decay(
                n0,
                config.decay_probability,
                config.steps,
                config.sampler,
                &mut *rng,
            )?);
        }
        points.push(aggregate_point(n0, &runs, &theory)?);
    }
    Ok(SweepResult::from_points(&points))
}

fn aggregate_point(n0: u64, runs: &[Trajectory], theory: &[f64]) -> Result<PointResult, SimError> {
    let absolute = compute_rms_over_curve(runs, theory)?;
    let normalized = normalize(&absolute, n0)?;
    Ok(PointResult {
        n0,
        absolute,
        normalized,
    })
}
