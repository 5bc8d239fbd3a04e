//! Stochastic data generation.
//!
//! - particle-by-particle decay trajectories (`simulate`)
//! - per-run seed derivation for reproducible parallel sweeps (`seed`)

pub mod seed;
pub mod simulate;

pub use seed::*;
pub use simulate::*;
