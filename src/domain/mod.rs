//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - experiment inputs (`Parameters`, `SweepConfig`, `RateModel`, `Sampler`)
//! - trajectories produced by the simulator (`Trajectory`)
//! - statistics and fit outputs (`RmsResult`, `SweepResult`, `FitResult`)

pub mod types;

pub use types::*;
