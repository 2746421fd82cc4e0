//! Engine construction errors.
//!
//! Options are validated once, when an engine is built; a running engine
//! has no recoverable error paths.

use thiserror::Error;

/// Rejected engine options.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    #[error("star count must be at least 1")]
    EmptyField,
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidFactor { name: &'static str, value: f32 },
    #[error("{name} range must satisfy min < max with finite bounds, got [{min}, {max})")]
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("respawn probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("base sparkle life must be at least 1 ms")]
    ZeroLife,
    #[error("sparkle cap must be at least 1 when set")]
    ZeroCap,
}

pub(crate) fn check_factor(name: &'static str, value: f32) -> Result<(), OptionsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(OptionsError::InvalidFactor { name, value })
    }
}

pub(crate) fn check_range(name: &'static str, (min, max): (f32, f32)) -> Result<(), OptionsError> {
    if min.is_finite() && max.is_finite() && min < max {
        Ok(())
    } else {
        Err(OptionsError::InvalidRange { name, min, max })
    }
}
