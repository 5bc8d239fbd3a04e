//! Shared experiment pipeline used by every `decay` subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! sweep config -> parallel (or sequential) sweep -> absolute + normalized fits
//!
//! The CLI can then focus on presentation (text tables vs JSON).

use clap::ValueEnum;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::data::simulate_decay;
use crate::domain::{FitRange, FitResult, RateModel, Sampler, SweepConfig, SweepResult, Trajectory};
use crate::error::SimError;
use crate::fit::fit_sweep;
use crate::models::{analytical_decay, exact_survival};
use crate::sweep::{run_sweep, run_sweep_with_rng};

/// How sweep work is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Execution {
    /// Rayon across `N0` and runs; one derived generator per run.
    #[default]
    Parallel,
    /// One generator shared by every run, in sweep order.
    Sequential,
}

/// All computed outputs of a single sweep experiment.
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentOutput {
    pub config: SweepConfig,
    pub seed: u64,
    pub execution: Execution,
    pub sweep: SweepResult,
    pub fit_range: FitRange,
    pub fit_abs: FitResult,
    pub fit_norm: FitResult,
}

/// One simulated trajectory next to its analytical curve.
#[derive(Debug, Clone, Serialize)]
pub struct TraceOutput {
    pub n0: u64,
    pub decay_probability: f64,
    pub rate_model: RateModel,
    pub seed: u64,
    pub simulated: Trajectory,
    pub theory: Vec<f64>,
    /// `N0 · (1 - p)^t`, the simulator's exact expectation.
    pub expected: Vec<f64>,
}

/// Run the sweep and fit both RMS statistics over `fit_range`.
pub fn run_experiment(
    config: &SweepConfig,
    seed: u64,
    execution: Execution,
    fit_range: FitRange,
) -> Result<ExperimentOutput, SimError> {
    let sweep = match execution {
        Execution::Parallel => run_sweep(config, seed)?,
        Execution::Sequential => run_sweep_with_rng(config, &mut StdRng::seed_from_u64(seed))?,
    };
    let (fit_abs, fit_norm) = fit_sweep(&sweep, fit_range)?;

    Ok(ExperimentOutput {
        config: config.clone(),
        seed,
        execution,
        sweep,
        fit_range,
        fit_abs,
        fit_norm,
    })
}

/// Simulate a single trajectory and evaluate its analytical reference.
pub fn run_trace(
    n0: u64,
    p: f64,
    steps: usize,
    rate_model: RateModel,
    sampler: Sampler,
    seed: u64,
) -> Result<TraceOutput, SimError> {
    if steps == 0 {
        return Err(SimError::invalid("steps", "must be > 0, got 0"));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let simulated = simulate_decay(n0, p, steps, sampler, &mut rng)?;
    let theory = analytical_decay(n0, p, steps, rate_model);
    let expected = exact_survival(n0, p, steps);

    Ok(TraceOutput {
        n0,
        decay_probability: p,
        rate_model,
        seed,
        simulated,
        theory,
        expected,
    })
}
