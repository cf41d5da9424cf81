/*
 * Error Module
 *
 * Errors raised while configuring or constructing a simulation.
 * Running a world never fails; only setup can.
 */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParam { field: &'static str, reason: String },

    #[error("invalid bounds {width}x{height}: dimensions must be finite and non-negative")]
    InvalidBounds { width: f64, height: f64 },

    #[error("bug id {0} appears more than once")]
    DuplicateBugId(u64),

    #[error("failed to access parameter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse parameter file: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidParam {
            field,
            reason: reason.into(),
        }
    }
}
