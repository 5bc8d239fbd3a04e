//! Error types.
//!
//! - `SimError` is what the library core returns. Every variant carries the
//!   offending value so the caller can report it.
//! - `AppError` is the binary-level wrapper (message + process exit code).

use thiserror::Error;

/// Errors surfaced by the simulation / statistics / fitting core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// An input outside its domain (`N0`, decay probability, steps, runs, fit range...).
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Two sequences that must be index-aligned have different lengths.
    #[error("shape mismatch in {context}: expected length {expected}, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Too few runs / points for the requested statistic or fit.
    #[error("insufficient data for {context}: need at least {required}, got {actual}")]
    InsufficientData {
        context: &'static str,
        required: usize,
        actual: usize,
    },

    /// The nonlinear optimizer failed to reach a finite minimum.
    #[error("power-law fit did not converge after {iterations} iterations: {reason}")]
    FitDidNotConverge { iterations: usize, reason: String },
}

impl SimError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Short kind label, used by the CLI when reporting failures.
    pub fn kind(&self) -> &'static str {
        match self {
            SimError::InvalidParameter { .. } => "InvalidParameter",
            SimError::ShapeMismatch { .. } => "ShapeMismatch",
            SimError::InsufficientData { .. } => "InsufficientData",
            SimError::FitDidNotConverge { .. } => "FitDidNotConverge",
        }
    }
}

/// Process exit codes: 2 invalid input, 3 not enough data, 4 fit failure,
/// 5 output rendering.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<SimError> for AppError {
    fn from(err: SimError) -> Self {
        let exit_code = match err {
            SimError::InvalidParameter { .. } => 2,
            SimError::ShapeMismatch { .. } | SimError::InsufficientData { .. } => 3,
            SimError::FitDidNotConverge { .. } => 4,
        };
        AppError::new(exit_code, format!("{}: {err}", err.kind()))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
