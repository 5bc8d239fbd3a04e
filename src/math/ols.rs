//! Small dense least-squares solver.
//!
//! The power-law fitter solves two kinds of tiny (2-column) problems:
//!
//! ```text
//! minimize ||X β - y||^2
//! ```
//!
//! - the log-linear starting point (`ln y = ln a + b ln x`)
//! - each damped Gauss–Newton step, as the augmented system `[J; √λ D] δ = [r; 0]`
//!
//! Both matrices are tall, so we use SVD rather than `QR::solve` (which is meant
//! for square systems). Rank-deficient inputs (e.g. a zero Jacobian column when
//! `scale == 0`) get the minimum-norm solution.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if no tolerance yields a finite solution.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Progressively looser singular-value cutoffs.
    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_fits_log_line() {
        // ln y = ln 2 + 0.5 ln x on x = [1, 4, 16]
        let xs = [1.0f64, 4.0, 16.0];
        let mut x = DMatrix::<f64>::zeros(3, 2);
        let mut y = DVector::<f64>::zeros(3);
        for (i, &v) in xs.iter().enumerate() {
            x[(i, 0)] = 1.0;
            x[(i, 1)] = v.ln();
            y[i] = (2.0 * v.sqrt()).ln();
        }

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0].exp() - 2.0).abs() < 1e-10);
        assert!((beta[1] - 0.5).abs() < 1e-10);
    }

    #[test]
    fn rank_deficient_column_gets_min_norm_solution() {
        // Second column is identically zero: its coefficient should come back 0.
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 2.0, 0.0, 3.0, 0.0]);
        let y = DVector::from_row_slice(&[2.0, 4.0, 6.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!(beta[1].abs() < 1e-10);
    }
}
