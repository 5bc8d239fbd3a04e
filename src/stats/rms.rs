//! RMS deviation of simulated trajectories from the analytical curve.
//!
//! For each run we compute
//!
//! ```text
//! rms_run = sqrt( mean_t (sim[t] - theory[t])^2 )
//! ```
//!
//! and then summarise the per-run values by their mean and population standard
//! deviation. The normalized variant divides by `√N0`: counting noise grows like
//! `√N0`, so the normalized mean should be roughly flat across a sweep.

use crate::domain::{RmsResult, Trajectory};
use crate::error::SimError;

/// Compare a run set against one analytical curve.
pub fn compute_rms_over_curve(runs: &[Trajectory], theory: &[f64]) -> Result<RmsResult, SimError> {
    if runs.is_empty() {
        return Err(SimError::InsufficientData {
            context: "RMS aggregation (runs)",
            required: 1,
            actual: 0,
        });
    }
    if theory.is_empty() {
        return Err(SimError::InsufficientData {
            context: "RMS aggregation (time steps)",
            required: 1,
            actual: 0,
        });
    }

    let mut per_run_values = Vec::with_capacity(runs.len());
    for run in runs {
        if run.len() != theory.len() {
            return Err(SimError::ShapeMismatch {
                context: "trajectory vs analytical curve",
                expected: theory.len(),
                actual: run.len(),
            });
        }
        let sq_sum: f64 = run
            .counts()
            .iter()
            .zip(theory.iter())
            .map(|(&sim, &th)| {
                let d = sim as f64 - th;
                d * d
            })
            .sum();
        per_run_values.push((sq_sum / theory.len() as f64).sqrt());
    }

    let (mean, std) = mean_and_std(&per_run_values);
    Ok(RmsResult {
        mean,
        std,
        per_run_values,
    })
}

/// Divide an RMS result by `√N0`.
pub fn normalize(result: &RmsResult, n0: u64) -> Result<RmsResult, SimError> {
    if n0 == 0 {
        return Err(SimError::invalid("n0", "cannot normalize by sqrt(0)"));
    }
    let scale = (n0 as f64).sqrt();
    Ok(RmsResult {
        mean: result.mean / scale,
        std: result.std / scale,
        per_run_values: result.per_run_values.iter().map(|v| v / scale).collect(),
    })
}

/// Mean and population standard deviation. Callers guarantee a non-empty slice.
fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, var.max(0.0).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traj(counts: &[u64]) -> Trajectory {
        Trajectory::from_counts(counts.to_vec())
    }

    #[test]
    fn per_run_rms_and_population_std() {
        let theory = [10.0, 5.0, 2.0];
        // run a: deviations (0, 1, -1)  -> rms = sqrt(2/3)
        // run b: deviations (0, 0, 0)   -> rms = 0
        let runs = vec![traj(&[10, 6, 1]), traj(&[10, 5, 2])];
        let r = compute_rms_over_curve(&runs, &theory).unwrap();

        let a = (2.0f64 / 3.0).sqrt();
        assert!((r.per_run_values[0] - a).abs() < 1e-12);
        assert_eq!(r.per_run_values[1], 0.0);
        assert!((r.mean - a / 2.0).abs() < 1e-12);
        // Population std of {a, 0} is a/2.
        assert!((r.std - a / 2.0).abs() < 1e-12);
    }

    #[test]
    fn values_are_non_negative() {
        let theory = [100.0, 90.0, 81.0, 72.9];
        let runs = vec![traj(&[100, 95, 80, 70]), traj(&[100, 88, 79, 75]), traj(&[100, 90, 81, 73])];
        let r = compute_rms_over_curve(&runs, &theory).unwrap();
        assert!(r.per_run_values.iter().all(|&v| v >= 0.0));
        assert!(r.mean >= 0.0);
        assert!(r.std >= 0.0);
    }

    #[test]
    fn exact_reproduction_gives_zero_rms() {
        let theory = [4.0, 4.0];
        let r = compute_rms_over_curve(&[traj(&[4, 4])], &theory).unwrap();
        assert_eq!(r.mean, 0.0);
        assert_eq!(r.std, 0.0);
    }

    #[test]
    fn empty_run_set_is_rejected() {
        let err = compute_rms_over_curve(&[], &[1.0]).unwrap_err();
        assert!(matches!(err, SimError::InsufficientData { .. }));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = compute_rms_over_curve(&[traj(&[3, 2])], &[3.0, 2.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            SimError::ShapeMismatch {
                context: "trajectory vs analytical curve",
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn normalization_divides_by_sqrt_n0() {
        let abs = RmsResult {
            mean: 12.0,
            std: 3.0,
            per_run_values: vec![9.0, 15.0],
        };
        let norm = normalize(&abs, 144).unwrap();
        assert_eq!(norm.mean, abs.mean / 12.0);
        assert_eq!(norm.std, abs.std / 12.0);
        assert_eq!(norm.per_run_values, vec![0.75, 1.25]);
        assert!(normalize(&abs, 0).is_err());
    }
}
