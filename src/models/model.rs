//! Analytical decay curves.
//!
//! The reference curve is continuous exponential decay `N0 · exp(-λ t)` sampled at
//! integer steps `t = 0..steps-1`. The rate is chosen by `RateModel`:
//!
//! - `Effective`: `λ = -ln(1 - p)`, so the curve equals the exact expected survival
//!   `N0 · (1 - p)^t` of the Bernoulli simulator
//! - `Raw`: `λ = p`
//!
//! Callers are expected to validate `p` first (see `Parameters::validate`).

use crate::domain::RateModel;

/// Continuous decay rate for a per-step decay probability.
///
/// `p = 1` gives `+∞` (everything decays in the first step).
pub fn effective_rate(p: f64) -> f64 {
    // -ln(1 - p) via ln_1p keeps precision for small p.
    -(-p).ln_1p()
}

/// Rate used by the given model variant.
pub fn decay_rate(p: f64, model: RateModel) -> f64 {
    match model {
        RateModel::Effective => effective_rate(p),
        RateModel::Raw => p,
    }
}

/// Deterministic decay curve `N0 · exp(-λ t)` for `t = 0..steps-1`.
///
/// `steps == 0` yields an empty curve. The first value is exactly `N0`.
pub fn analytical_decay(n0: u64, p: f64, steps: usize, model: RateModel) -> Vec<f64> {
    let n0 = n0 as f64;
    let rate = decay_rate(p, model);
    (0..steps)
        .map(|t| {
            if t == 0 {
                // Avoid `∞ · 0` when the rate is infinite.
                n0
            } else {
                n0 * (-rate * t as f64).exp()
            }
        })
        .collect()
}

/// Exact expected survival of the discrete process: `N0 · (1 - p)^t`.
///
/// Independent of the rate model; `trace` prints it next to the chosen curve.
pub fn exact_survival(n0: u64, p: f64, steps: usize) -> Vec<f64> {
    let n0 = n0 as f64;
    let keep = 1.0 - p;
    (0..steps).map(|t| n0 * keep.powf(t as f64)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_is_n0_and_curve_is_positive_non_increasing() {
        for model in [RateModel::Effective, RateModel::Raw] {
            for &p in &[0.0, 0.01, 0.1, 0.5, 0.99] {
                let curve = analytical_decay(750, p, 60, model);
                assert_eq!(curve.len(), 60);
                assert_eq!(curve[0], 750.0);
                for w in curve.windows(2) {
                    assert!(w[1] > 0.0, "p={p} model={model:?}: non-positive value");
                    assert!(w[1] <= w[0], "p={p} model={model:?}: increasing");
                }
            }
        }
    }

    #[test]
    fn reference_scenario_is_effectively_fully_decayed() {
        let curve = analytical_decay(1000, 0.1, 101, RateModel::Effective);
        assert_eq!(curve[0], 1000.0);
        assert!((effective_rate(0.1) - 0.10536).abs() < 1e-5);
        let expected = 1000.0 * (-effective_rate(0.1) * 100.0).exp();
        assert!((curve[100] - expected).abs() < 1e-12);
        assert!((curve[100] - 0.0266).abs() < 1e-4, "got {}", curve[100]);
    }

    #[test]
    fn effective_rate_matches_exact_discrete_survival() {
        let a = analytical_decay(1000, 0.1, 75, RateModel::Effective);
        let b = exact_survival(1000, 0.1, 75);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() <= 1e-9 * y.max(1.0));
        }

        // The raw variant decays more slowly than the discrete process.
        let raw = analytical_decay(1000, 0.1, 75, RateModel::Raw);
        assert!(raw[50] > b[50]);
    }

    #[test]
    fn zero_steps_gives_empty_curve() {
        assert!(analytical_decay(10, 0.1, 0, RateModel::Effective).is_empty());
    }

    #[test]
    fn certain_decay_drops_to_zero_after_first_step() {
        let curve = analytical_decay(50, 1.0, 4, RateModel::Effective);
        assert_eq!(curve, vec![50.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let a = analytical_decay(321, 0.07, 40, RateModel::Effective);
        let b = analytical_decay(321, 0.07, 40, RateModel::Effective);
        assert_eq!(a, b);
    }
}
