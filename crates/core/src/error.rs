//! Error taxonomy for the climate engine
//!
//! Every failure is a rejected call. Nothing is clamped silently and nothing
//! is retried; the engine is ready for the next call after any error.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the engine components
#[derive(Debug, Error)]
pub enum EngineError {
    /// A climate input is outside its physical domain
    #[error("invalid input `{field}` = {value}: {reason}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A physical constant is unset, out of range or contradictory
    #[error("configuration error in `{parameter}`: {reason}")]
    Configuration { parameter: String, reason: String },

    /// Reading a configuration document from disk failed
    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        EngineError::InvalidInput {
            field,
            value,
            reason,
        }
    }

    pub(crate) fn config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::Configuration {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// True for the `InvalidInput` family
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, EngineError::InvalidInput { .. })
    }

    /// True for the `Configuration` family
    pub fn is_configuration(&self) -> bool {
        matches!(self, EngineError::Configuration { .. })
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, EngineError>;

/// Reject non-finite or negative values
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(EngineError::invalid(field, value, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(EngineError::invalid(field, value, "must not be negative"));
    }
    Ok(value)
}

/// Reject non-finite values
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::invalid(field, value, "must be a finite number"))
    }
}
