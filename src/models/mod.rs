//! Analytical (deterministic) decay model.
//!
//! Implemented as small, pure functions so the sweep can evaluate the reference
//! curve once per `N0` and share it across runs.

pub mod model;

pub use model::*;
