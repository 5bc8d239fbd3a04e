//! Power-law fit `y = scale · x^exponent`.
//!
//! Given:
//! - `N0` values `x_i` (the sweep grid)
//! - RMS statistics `y_i` (absolute or normalized)
//! - an inclusive `N0` range
//!
//! we minimise the untransformed residuals
//!
//! ```text
//! minimize Σ (y_i - a x_i^b)^2
//! ```
//!
//! with Levenberg–Marquardt. Each damped Gauss–Newton step is solved as an
//! augmented least-squares problem (`[J; √λ D] δ = [r; 0]`) using the SVD solver
//! in `math::ols`.
//!
//! Initialization uses a log-linear regression over the points with `y > 0`.
//! Zero-valued `y` only affects the starting point; it is still part of the
//! objective.
//!
//! Residuals are divided by `max |y|` inside the optimizer so the objective stays
//! finite for any representable `y`; the reported `sse`/`rmse` are unscaled.

use nalgebra::{DMatrix, DVector};

use crate::domain::{FitRange, FitResult, SweepResult};
use crate::error::SimError;
use crate::math::solve_least_squares;

/// Iteration cap before reporting non-convergence.
const MAX_ITERS: usize = 200;

/// Relative parameter-step tolerance.
const X_TOL: f64 = 1e-10;

/// Relative SSE-reduction tolerance for accepted steps.
const F_TOL: f64 = 1e-14;

const LAMBDA_INIT: f64 = 1e-3;
const LAMBDA_MIN: f64 = 1e-12;
const LAMBDA_MAX: f64 = 1e16;

/// Fit both the absolute and normalized RMS means of a sweep over `range`.
pub fn fit_sweep(sweep: &SweepResult, range: FitRange) -> Result<(FitResult, FitResult), SimError> {
    let x = sweep.n0_f64();
    let abs = fit_power_law(&x, &sweep.rms_mean, range)?;
    let norm = fit_power_law(&x, &sweep.rms_norm_mean, range)?;
    Ok((abs, norm))
}

/// Fit `y = scale · x^exponent` to the points whose `x` lies inside `range`.
pub fn fit_power_law(x: &[f64], y: &[f64], range: FitRange) -> Result<FitResult, SimError> {
    let (xs, ys) = select_range(x, y, range)?;

    let distinct = count_distinct(&xs);
    if distinct < 2 {
        return Err(SimError::InsufficientData {
            context: "power-law fit (distinct N0 in range)",
            required: 2,
            actual: distinct,
        });
    }

    let (a0, b0) = log_linear_init(&xs, &ys);
    levenberg_marquardt(&xs, &ys, a0, b0, MAX_ITERS)
}

/// Restrict `(x, y)` to `range.min <= x <= range.max`, validating both inputs.
pub fn select_range(x: &[f64], y: &[f64], range: FitRange) -> Result<(Vec<f64>, Vec<f64>), SimError> {
    if x.len() != y.len() {
        return Err(SimError::ShapeMismatch {
            context: "power-law fit inputs",
            expected: x.len(),
            actual: y.len(),
        });
    }

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        // Checked before the range filter: NaN never falls inside a range.
        if !(xi.is_finite() && xi > 0.0) {
            return Err(SimError::invalid("n0", format!("must be finite and > 0, got {xi}")));
        }
        if !range.contains(xi) {
            continue;
        }
        if !yi.is_finite() {
            return Err(SimError::invalid("rms", format!("must be finite, got {yi} at N0={xi}")));
        }
        xs.push(xi);
        ys.push(yi);
    }
    Ok((xs, ys))
}

fn count_distinct(xs: &[f64]) -> usize {
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted.dedup();
    sorted.len()
}

/// Starting point from `ln y = ln a + b ln x` over positive `y`.
///
/// Falls back to a flat line at the mean when fewer than two distinct `x` have
/// positive `y`.
fn log_linear_init(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    let (lx, ly): (Vec<f64>, Vec<f64>) = xs
        .iter()
        .zip(ys.iter())
        .filter(|&(_, &y)| y > 0.0)
        .map(|(&x, &y)| (x.ln(), y.ln()))
        .unzip();

    let mean_y = ys.iter().sum::<f64>() / ys.len() as f64;
    let flat = (mean_y.max(0.0), 0.0);

    if count_distinct(&lx) < 2 {
        return flat;
    }

    let n = lx.len();
    let mut design = DMatrix::<f64>::zeros(n, 2);
    for (i, &v) in lx.iter().enumerate() {
        design[(i, 0)] = 1.0;
        design[(i, 1)] = v;
    }
    let rhs = DVector::from_vec(ly);

    match solve_least_squares(&design, &rhs) {
        Some(beta) if beta[0].exp().is_finite() => (beta[0].exp(), beta[1]),
        _ => flat,
    }
}

/// `max |y|`, or 1 when every `y` is zero.
fn residual_scale(ys: &[f64]) -> f64 {
    let m = ys.iter().fold(0.0f64, |m, &y| m.max(y.abs()));
    if m > 0.0 { m } else { 1.0 }
}

/// Sum of squared residuals, each divided by `scale`.
fn sse(xs: &[f64], ys: &[f64], a: f64, b: f64, scale: f64) -> f64 {
    xs.iter()
        .zip(ys.iter())
        .map(|(&x, &y)| {
            let r = (y - a * x.powf(b)) / scale;
            r * r
        })
        .sum()
}

fn levenberg_marquardt(
    xs: &[f64],
    ys: &[f64],
    a0: f64,
    b0: f64,
    max_iters: usize,
) -> Result<FitResult, SimError> {
    let n = xs.len();
    let y_scale = residual_scale(ys);
    let (mut a, mut b) = (a0, b0);
    let mut cost = sse(xs, ys, a, b, y_scale);
    if !cost.is_finite() {
        return Err(SimError::FitDidNotConverge {
            iterations: 0,
            reason: format!("non-finite SSE at initial guess (scale={a}, exponent={b})"),
        });
    }

    let mut lambda = LAMBDA_INIT;
    let mut iterations = 0;

    while cost > 0.0 {
        if iterations == max_iters {
            return Err(SimError::FitDidNotConverge {
                iterations,
                reason: format!("iteration cap reached (scaled sse={cost:e})"),
            });
        }
        iterations += 1;

        // Residuals and Jacobian of the model a·x^b.
        let mut jac = DMatrix::<f64>::zeros(n + 2, 2);
        let mut rhs = DVector::<f64>::zeros(n + 2);
        for i in 0..n {
            let xb = xs[i].powf(b);
            jac[(i, 0)] = xb / y_scale;
            jac[(i, 1)] = a * xb * xs[i].ln() / y_scale;
            rhs[i] = (ys[i] - a * xb) / y_scale;
        }

        // Marquardt damping scaled by the column norms.
        let sl = lambda.sqrt();
        for j in 0..2 {
            let col_norm = jac.column(j).rows(0, n).norm().max(1e-12);
            jac[(n + j, j)] = sl * col_norm;
        }

        let Some(delta) = solve_least_squares(&jac, &rhs) else {
            return Err(SimError::FitDidNotConverge {
                iterations,
                reason: "damped normal step could not be solved".to_string(),
            });
        };

        let small_step = delta[0].abs() <= X_TOL * (a.abs() + X_TOL)
            && delta[1].abs() <= X_TOL * (b.abs() + X_TOL);

        let (a_new, b_new) = (a + delta[0], b + delta[1]);
        let cost_new = sse(xs, ys, a_new, b_new, y_scale);

        if cost_new.is_finite() && cost_new <= cost {
            let reduction = cost - cost_new;
            a = a_new;
            b = b_new;
            cost = cost_new;
            lambda = (lambda / 10.0).max(LAMBDA_MIN);
            if small_step || reduction <= F_TOL * cost {
                break;
            }
        } else {
            // At the minimum (to machine precision) no step improves; stop there.
            if small_step {
                break;
            }
            lambda *= 10.0;
            if lambda > LAMBDA_MAX {
                return Err(SimError::FitDidNotConverge {
                    iterations,
                    reason: format!("damping diverged (scaled sse={cost:e})"),
                });
            }
        }
    }

    if !(a.is_finite() && b.is_finite()) {
        return Err(SimError::FitDidNotConverge {
            iterations,
            reason: format!("non-finite parameters (scale={a}, exponent={b})"),
        });
    }

    Ok(FitResult {
        scale: a,
        exponent: b,
        n_points: n,
        sse: cost * y_scale * y_scale,
        rmse: y_scale * (cost / n as f64).sqrt(),
        iterations,
    })
}
