//! Error types for the diffusion solvers.
//!
//! This module provides a unified error type [`DiffusionError`] that covers
//! all error conditions that can occur during parameter setup, time stepping,
//! and export of results.

use thiserror::Error;

/// Result type alias using [`DiffusionError`].
pub type Result<T> = std::result::Result<T, DiffusionError>;

/// Unified error type for all diffusion operations.
#[derive(Error, Debug)]
pub enum DiffusionError {
    // ============ Configuration Errors ============
    /// Simulation parameter outside its valid range
    #[error("Invalid parameter '{param}' = {value}: {message}")]
    InvalidParameter {
        param: &'static str,
        value: f64,
        message: String,
    },

    /// Vector length does not match the grid or its companion vector
    #[error("Grid size mismatch for {what}: expected {expected} values, found {found}")]
    GridMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    /// Operation requires at least one value
    #[error("Cannot {operation} an empty vector")]
    EmptyVector { operation: &'static str },

    /// Vector maximum cannot be used as a normalization divisor
    #[error("Cannot normalize by maximum value {max}")]
    ZeroMaximum { max: f64 },

    /// Unrecognized scheme or boundary treatment name
    #[error("Unknown {kind} '{name}'")]
    UnknownVariant { kind: &'static str, name: String },

    /// A different scheme already advanced this field
    #[error("Field is being advanced by {active}; reset before switching to {requested}")]
    SchemeConflict {
        active: &'static str,
        requested: &'static str,
    },

    // ============ Numerical Errors ============
    /// Zero pivot during tridiagonal elimination
    #[error("Singular tridiagonal system: pivot {pivot:.3e} at row {row}")]
    SingularSystem { row: usize, pivot: f64 },

    /// Diagonals and right-hand side have inconsistent lengths
    #[error("Malformed tridiagonal system: {message}")]
    SystemShape { message: String },

    // ============ I/O Errors ============
    /// Output directory could not be created
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be opened or written
    #[error("Failed to write '{path}': {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl DiffusionError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(param: &'static str, value: f64, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param,
            value,
            message: message.into(),
        }
    }

    /// Create a grid mismatch error
    pub fn grid_mismatch(what: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::GridMismatch {
            what: what.into(),
            expected,
            found,
        }
    }

    /// Create a malformed system error
    pub fn system_shape(message: impl Into<String>) -> Self {
        Self::SystemShape {
            message: message.into(),
        }
    }

    /// Whether the error came from the numerical core rather than setup or I/O.
    pub fn is_numerical(&self) -> bool {
        matches!(self, Self::SingularSystem { .. } | Self::SystemShape { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DiffusionError::invalid_parameter("h", 0.0, "must be in (0, 1]");
        assert_eq!(err.to_string(), "Invalid parameter 'h' = 0: must be in (0, 1]");

        let err = DiffusionError::grid_mismatch("x coordinates", 11, 10);
        assert!(err.to_string().contains("expected 11"));
    }

    #[test]
    fn test_numerical_classification() {
        assert!(DiffusionError::SingularSystem { row: 2, pivot: 0.0 }.is_numerical());
        assert!(DiffusionError::system_shape("rhs").is_numerical());
        assert!(!DiffusionError::EmptyVector { operation: "export" }.is_numerical());
    }
}
