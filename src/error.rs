//! Error types for antpath.
//!
//! All fallible operations return `Result<T, AcoError>` instead of panicking.
//! A stalled ant is not an error: it is reported through
//! [`StepReport`](crate::colony::StepReport).

use thiserror::Error;

/// Result type alias for antpath operations.
pub type AcoResult<T> = Result<T, AcoError>;

/// Unified error type for all antpath operations.
#[derive(Debug, Error)]
pub enum AcoError {
    // ===== Preconditions =====
    /// A tour needs at least two cities.
    #[error("At least 2 cities are required, got {n}")]
    TooFewCities {
        /// Number of cities supplied.
        n: usize,
    },

    /// City coordinates must be finite.
    #[error("City {index} has non-finite coordinates ({x}, {y})")]
    NonFiniteCoordinate {
        /// Index of the offending city.
        index: usize,
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
    },

    // ===== Jidoka Violations =====
    /// Numerical instability detected (NaN or Inf).
    #[error("Jidoka: non-finite value detected at {location}")]
    NonFiniteValue {
        /// Location where the non-finite value was detected.
        location: String,
    },

    /// Constraint violation detected.
    #[error("Jidoka: constraint '{name}' violated by {violation:.6e} (tolerance: {tolerance:.6e})")]
    ConstraintViolation {
        /// Name of the violated constraint.
        name: String,
        /// Amount of violation.
        violation: f64,
        /// Configured tolerance.
        tolerance: f64,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AcoError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error rejects the input before the colony starts.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::TooFewCities { .. }
                | Self::NonFiniteCoordinate { .. }
                | Self::Config { .. }
                | Self::Validation(_)
        )
    }

    /// Check if this error is a Jidoka violation.
    #[must_use]
    pub const fn is_jidoka_violation(&self) -> bool {
        matches!(
            self,
            Self::NonFiniteValue { .. } | Self::ConstraintViolation { .. }
        )
    }
}
