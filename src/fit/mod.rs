//! Power-law fitting over a sweep.
//!
//! Responsibilities:
//!
//! - restrict the sweep to a caller-supplied `N0` range (by value)
//! - fit `scale · N0^exponent` by nonlinear least squares
//! - surface non-convergence to the caller instead of defaulting

pub mod power_law;

pub use power_law::*;
