//! Deterministic sub-stream seeds.
//!
//! The parallel sweep gives every simulation run its own generator. Each seed is
//! derived from `(base seed, N0, run index)` only, so results do not depend on how
//! rayon schedules the work.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Seed for run `run` of sweep point `n0`.
pub fn run_seed(base: u64, n0: u64, run: usize) -> u64 {
    let mut hasher = DefaultHasher::new();
    base.hash(&mut hasher);
    n0.hash(&mut hasher);
    (run as u64).hash(&mut hasher);
    hasher.finish()
}

/// Generator for run `run` of sweep point `n0`.
pub fn run_rng(base: u64, n0: u64, run: usize) -> StdRng {
    StdRng::seed_from_u64(run_seed(base, n0, run))
}
