//! Statistics over simulated run sets.

pub mod rms;

pub use rms::*;
