//! `N0` grid generation.
//!
//! The sweep samples initial populations on a log scale so every decade gets the
//! same number of points. Grid values are truncated to integers and de-duplicated,
//! which can leave fewer than `points` values at the low end.

use crate::error::SimError;

/// Strictly increasing integer `N0` grid, log-spaced between `min` and `max`
/// (both included).
pub fn n0_grid(min: u64, max: u64, points: usize) -> Result<Vec<u64>, SimError> {
    if min == 0 || max <= min {
        return Err(SimError::invalid(
            "n0_range",
            format!("need 0 < min < max, got min={min}, max={max}"),
        ));
    }
    if points < 2 {
        return Err(SimError::invalid("n0_points", format!("must be >= 2, got {points}")));
    }

    let ln_min = (min as f64).ln();
    let step = ((max as f64).ln() - ln_min) / (points - 1) as f64;

    let mut grid: Vec<u64> = (0..points)
        .map(|i| {
            let v = (ln_min + step * i as f64).exp();
            // Nudge before truncating so exact powers (e.g. 10^4) don't land one below.
            ((v * (1.0 + 1e-12)).floor() as u64).clamp(min, max)
        })
        .collect();
    grid.dedup();
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decade_grid_hits_exact_powers() {
        assert_eq!(n0_grid(10, 10_000, 4).unwrap(), vec![10, 100, 1000, 10_000]);
    }

    #[test]
    fn default_grid_is_strictly_increasing_integers() {
        let grid = n0_grid(10, 10_000, 20).unwrap();
        assert_eq!(grid[0], 10);
        assert_eq!(*grid.last().unwrap(), 10_000);
        assert!(grid.len() <= 20);
        for w in grid.windows(2) {
            assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn dense_low_grid_is_deduplicated() {
        let grid = n0_grid(1, 4, 10).unwrap();
        assert_eq!(grid, vec![1, 2, 3, 4]);
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        assert!(n0_grid(0, 100, 5).is_err());
        assert!(n0_grid(100, 10, 5).is_err());
        assert!(n0_grid(10, 10, 5).is_err());
        assert!(n0_grid(10, 100, 1).is_err());
    }
}
