//! Validation Error Types

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors during input validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Required field missing or blank
    #[error("{0} is required")]
    Required(&'static str),

    /// Text longer than allowed
    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Date later than allowed
    #[error("{field} must not be later than {latest}")]
    TooLate {
        field: &'static str,
        latest: DateTime<Utc>,
    },

    /// Too many entries in a list
    #[error("{field} accepts at most {max} entries (got {actual})")]
    TooMany {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required(field) => field,
            ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::TooLate { field, .. }
            | ValidationError::TooMany { field, .. } => field,
        }
    }
}
