//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the sweep, the aggregator and the fitter in-memory
//! - handed to a plotting/animation consumer as plain data
//! - rendered as JSON by the `decay` binary

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Which continuous rate the analytical reference curve uses.
///
/// The stochastic simulator treats `p` as the exact per-step, per-particle
/// decay probability, whose expected survival is `N0 · (1 - p)^t`. That curve is
/// `N0 · exp(-λ_eff · t)` with `λ_eff = -ln(1 - p)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RateModel {
    /// `λ = -ln(1 - p)`; matches the discrete simulator exactly.
    #[default]
    Effective,
    /// `λ = p`; first-order approximation, drifts from the simulator for large `p`.
    Raw,
}

impl RateModel {
    pub fn display_name(self) -> &'static str {
        match self {
            RateModel::Effective => "effective (-ln(1-p))",
            RateModel::Raw => "raw (p)",
        }
    }
}

/// How the simulator draws the number of decays per step.
///
/// Both samplers produce the same distribution (`Binomial(survivors, p)`); they
/// differ in cost and in how many variates they consume from the random source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sampler {
    /// One uniform draw per surviving particle, counted against `p`.
    #[default]
    Bernoulli,
    /// One binomial draw per step.
    Binomial,
}

/// Parameters of a single experiment point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub n0: u64,
    pub decay_probability: f64,
    pub steps: usize,
    pub runs: usize,
}

impl Parameters {
    /// Validate the parameter domain.
    ///
    /// `n0 == 0` is accepted here (the simulator handles it); the sweep applies the
    /// stricter `n0 > 0` rule because normalization divides by `√N0`.
    pub fn validate(&self) -> Result<(), SimError> {
        validate_probability(self.decay_probability)?;
        if self.steps == 0 {
            return Err(SimError::invalid("steps", "must be > 0, got 0"));
        }
        if self.runs == 0 {
            return Err(SimError::invalid("runs", "must be > 0, got 0"));
        }
        Ok(())
    }
}

/// Reject probabilities outside `[0, 1]` (including NaN).
pub fn validate_probability(p: f64) -> Result<(), SimError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(SimError::invalid(
            "decay_probability",
            format!("must be in [0, 1], got {p}"),
        ));
    }
    Ok(())
}

/// Surviving particle count at each discrete time step.
///
/// Invariants (upheld by the simulator): starts at `N0`, non-increasing, and once
/// it reaches zero it stays there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory {
    counts: Vec<u64>,
}

impl Trajectory {
    pub(crate) fn from_counts(counts: Vec<u64>) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Dispersion of per-run RMS deviation from the analytical curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RmsResult {
    pub mean: f64,
    /// Population standard deviation (divides by the run count).
    pub std: f64,
    pub per_run_values: Vec<f64>,
}

/// Sweep configuration: everything the orchestrator needs besides randomness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Strictly increasing, all `> 0`.
    pub n0_values: Vec<u64>,
    pub decay_probability: f64,
    pub steps: usize,
    pub runs: usize,
    pub rate_model: RateModel,
    pub sampler: Sampler,
}

impl SweepConfig {
    /// Per-point parameters for one `N0`.
    pub fn parameters(&self, n0: u64) -> Parameters {
        Parameters {
            n0,
            decay_probability: self.decay_probability,
            steps: self.steps,
            runs: self.runs,
        }
    }
}

/// Statistics for one sweep point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointResult {
    pub n0: u64,
    pub absolute: RmsResult,
    pub normalized: RmsResult,
}

/// Sweep output as parallel sequences aligned with `n0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SweepResult {
    pub n0: Vec<u64>,
    pub rms_mean: Vec<f64>,
    pub rms_std: Vec<f64>,
    pub rms_norm_mean: Vec<f64>,
    pub rms_norm_std: Vec<f64>,
}

impl SweepResult {
    /// Assemble the parallel sequences from per-point results (in sweep order).
    pub fn from_points(points: &[PointResult]) -> Self {
        let mut out = SweepResult {
            n0: Vec::with_capacity(points.len()),
            rms_mean: Vec::with_capacity(points.len()),
            rms_std: Vec::with_capacity(points.len()),
            rms_norm_mean: Vec::with_capacity(points.len()),
            rms_norm_std: Vec::with_capacity(points.len()),
        };
        for p in points {
            out.n0.push(p.n0);
            out.rms_mean.push(p.absolute.mean);
            out.rms_std.push(p.absolute.std);
            out.rms_norm_mean.push(p.normalized.mean);
            out.rms_norm_std.push(p.normalized.std);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.n0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n0.is_empty()
    }

    /// `N0` values as `f64` (fitter input).
    pub fn n0_f64(&self) -> Vec<f64> {
        self.n0.iter().map(|&n| n as f64).collect()
    }
}

/// Inclusive `N0` bounds (by value) for a power-law fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitRange {
    pub min: f64,
    pub max: f64,
}

impl FitRange {
    pub fn new(min: f64, max: f64) -> Result<Self, SimError> {
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(SimError::invalid(
                "fit_range",
                format!("bounds must be finite with min <= max, got [{min}, {max}]"),
            ));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }
}

impl Default for FitRange {
    fn default() -> Self {
        Self {
            min: 100.0,
            max: 1000.0,
        }
    }
}

/// Power law `y = scale · x^exponent` fitted by least squares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub scale: f64,
    pub exponent: f64,
    /// Number of points inside the fit range.
    pub n_points: usize,
    pub sse: f64,
    pub rmse: f64,
    /// Optimizer iterations until convergence.
    pub iterations: usize,
}

impl FitResult {
    pub fn predict(&self, x: f64) -> f64 {
        self.scale * x.powf(self.exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rms(mean: f64, std: f64) -> RmsResult {
        RmsResult {
            mean,
            std,
            per_run_values: vec![mean],
        }
    }

    #[test]
    fn parameters_reject_out_of_domain_values() {
        let ok = Parameters {
            n0: 10,
            decay_probability: 0.1,
            steps: 5,
            runs: 3,
        };
        assert!(ok.validate().is_ok());

        for p in [-0.01, 1.01, f64::NAN] {
            let bad = Parameters {
                decay_probability: p,
                ..ok
            };
            assert!(matches!(
                bad.validate(),
                Err(SimError::InvalidParameter {
                    name: "decay_probability",
                    ..
                })
            ));
        }
        assert!(Parameters { steps: 0, ..ok }.validate().is_err());
        assert!(Parameters { runs: 0, ..ok }.validate().is_err());
    }

    #[test]
    fn sweep_result_sequences_stay_aligned() {
        let points = vec![
            PointResult {
                n0: 10,
                absolute: rms(2.0, 0.5),
                normalized: rms(2.0 / 10f64.sqrt(), 0.5 / 10f64.sqrt()),
            },
            PointResult {
                n0: 40,
                absolute: rms(4.0, 1.0),
                normalized: rms(4.0 / 40f64.sqrt(), 1.0 / 40f64.sqrt()),
            },
        ];
        let sweep = SweepResult::from_points(&points);
        assert_eq!(sweep.len(), 2);
        assert_eq!(sweep.n0, vec![10, 40]);
        assert_eq!(sweep.rms_mean, vec![2.0, 4.0]);
        assert_eq!(sweep.rms_std.len(), 2);
        assert_eq!(sweep.rms_norm_mean.len(), 2);
        assert_eq!(sweep.rms_norm_std.len(), 2);
    }

    #[test]
    fn fit_range_is_inclusive_and_validated() {
        let r = FitRange::new(100.0, 1000.0).unwrap();
        assert!(r.contains(100.0));
        assert!(r.contains(1000.0));
        assert!(!r.contains(99.9));
        assert!(FitRange::new(5.0, 1.0).is_err());
        assert!(FitRange::new(f64::NAN, 1.0).is_err());
    }
}
