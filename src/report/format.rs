//! Formatted terminal output for experiments and traces.

use crate::app::pipeline::{ExperimentOutput, TraceOutput};
use crate::domain::FitResult;

/// Exponent predicted by counting statistics for the absolute RMS.
pub const THEORY_EXPONENT_ABS: f64 = 0.5;

/// Exponent predicted for the `√N0`-normalized RMS.
pub const THEORY_EXPONENT_NORM: f64 = 0.0;

/// Format the run header, the per-N0 table and both fits.
pub fn format_experiment(out: &ExperimentOutput) -> String {
    let mut s = String::new();
    let cfg = &out.config;

    s.push_str("=== decay - Monte Carlo vs analytical RMS scaling ===\n");
    s.push_str(&format!(
        "p={} | steps={} | runs={} | seed={} | rate={} | sampler={:?} | execution={:?}\n",
        cfg.decay_probability,
        cfg.steps,
        cfg.runs,
        out.seed,
        cfg.rate_model.display_name(),
        cfg.sampler,
        out.execution,
    ));
    s.push('\n');
    s.push_str(&format_sweep_table(out));
    s.push('\n');
    s.push_str(&format!(
        "Fit range: {} <= N0 <= {}\n",
        out.fit_range.min, out.fit_range.max
    ));
    s.push_str(&format_fit_line("RMS", &out.fit_abs, THEORY_EXPONENT_ABS));
    s.push_str(&format_fit_line("RMS/sqrt(N0)", &out.fit_norm, THEORY_EXPONENT_NORM));
    s
}

/// Per-N0 table; `*` marks points inside the fit range, `RMS fit` is the
/// absolute fit evaluated at every `N0`.
pub fn format_sweep_table(out: &ExperimentOutput) -> String {
    let sweep = &out.sweep;
    let mut s = String::new();
    s.push_str(&format!(
        "  {:>8}  {:>12}  {:>10}  {:>12}  {:>12}  {:>10}\n",
        "N0", "RMS mean", "RMS std", "RMS fit", "norm mean", "norm std"
    ));
    for i in 0..sweep.len() {
        let n0 = sweep.n0[i] as f64;
        let in_fit = if out.fit_range.contains(n0) { "*" } else { " " };
        s.push_str(&format!(
            "{in_fit} {:>8}  {:>12.4}  {:>10.4}  {:>12.4}  {:>12.5}  {:>10.5}\n",
            sweep.n0[i],
            sweep.rms_mean[i],
            sweep.rms_std[i],
            out.fit_abs.predict(n0),
            sweep.rms_norm_mean[i],
            sweep.rms_norm_std[i],
        ));
    }
    s
}

/// One fit summary line, with the theoretical exponent for comparison.
pub fn format_fit_line(label: &str, fit: &FitResult, theory: f64) -> String {
    format!(
        "- {label:<13} ~ {:.4} * N0^{:.4}  (theory slope {theory:.1}, diff {:+.4}) n={} rmse={:.4} iters={}\n",
        fit.scale,
        fit.exponent,
        fit.exponent - theory,
        fit.n_points,
        fit.rmse,
        fit.iterations,
    )
}

/// Step-by-step table of one trajectory against its analytical curve.
pub fn format_trace(trace: &TraceOutput) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "=== decay trace: N0={} p={} rate={} seed={} ===\n",
        trace.n0,
        trace.decay_probability,
        trace.rate_model.display_name(),
        trace.seed
    ));
    s.push_str(&format!(
        "{:>5}  {:>10}  {:>12}  {:>12}  {:>10}\n",
        "t", "simulated", "theory", "expected", "diff"
    ));
    let rows = trace
        .simulated
        .counts()
        .iter()
        .zip(trace.theory.iter())
        .zip(trace.expected.iter());
    for (t, ((&sim, &th), &ex)) in rows.enumerate() {
        s.push_str(&format!(
            "{t:>5}  {sim:>10}  {th:>12.3}  {ex:>12.3}  {:>+10.3}\n",
            sim as f64 - th
        ));
    }
    s
}
