//! Error types for spectral-sim
//!
//! The numerical model itself never fails: degenerate inputs are rejected
//! up front by [`crate::GeneratorConfig::validate`], and everything past
//! validation is a pure computation. Errors therefore come from two places
//! only: configuration (bad file, bad parameter) and the I/O boundary
//! (table writes, plot rendering, report assembly).

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum SimError {
    /// A configuration parameter failed fast validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration file could not be parsed.
    #[error("configuration file {path}: {reason}")]
    ConfigFile { path: String, reason: String },

    /// Plot rendering failed in the drawing backend.
    #[error("plot rendering failed: {0}")]
    Render(String),

    /// PDF report assembly failed.
    #[error("report assembly failed: {0}")]
    Report(String),

    /// Underlying filesystem failure; propagated, never retried.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Table serialization failure.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Convenience alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        SimError::InvalidConfig(reason.into())
    }
}
