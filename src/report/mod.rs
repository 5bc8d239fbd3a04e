//! Reporting: text tables and JSON rendering of experiment results.
//!
//! We keep formatting code in one place so:
//! - the simulation/fitting code stays free of presentation concerns
//! - a plotting consumer can take the JSON form without linking this crate

pub mod format;

pub use format::*;

use serde::Serialize;

use crate::error::AppError;

/// Render any result structure as pretty JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(5, format!("Failed to render JSON: {e}")))
}
