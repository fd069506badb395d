//! Shared error types used across submodules.

use thiserror::Error;

use crate::simulation::SimulationError;

/// Result type alias using [`CoilSimError`].
pub type Result<T> = std::result::Result<T, CoilSimError>;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum CoilSimError {
    /// Raised when a configured input is outside its physical range.
    #[error("invalid input '{parameter}': {reason}")]
    InvalidInput {
        /// Name of the offending configuration field.
        parameter: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
    /// Raised when derived circuit parameters are not physically meaningful.
    #[error("non-physical circuit parameter: {0}")]
    NonPhysical(String),
    /// Wraps simulation-related errors.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    /// Raised when reading a configuration or writing a report fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Raised when a configuration document cannot be decoded.
    #[cfg(feature = "serde")]
    #[error("configuration decode failed: {0}")]
    Config(#[from] serde_json::Error),
}

impl CoilSimError {
    /// Creates an invalid-input error.
    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            parameter,
            reason: reason.into(),
        }
    }
}
