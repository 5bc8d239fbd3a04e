//! `decay-rms` library crate.
//!
//! Estimates how far a particle-by-particle Monte Carlo of radioactive decay
//! strays from its analytical curve, and how that RMS deviation scales with the
//! initial population `N0`.
//!
//! The binary (`decay`) is a thin wrapper around this library so that:
//!
//! - the simulation/statistics core is testable without spawning processes
//! - a plotting or animation front-end can consume the same result types
//! - the core never prints, logs or touches the filesystem

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod models;
pub mod report;
pub mod stats;
pub mod sweep;
