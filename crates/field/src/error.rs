//! Error types for field construction and sampling.

use std::fmt;
use thiserror::Error;

/// Grid axis an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Columns (longitude).
    Column,
    /// Rows (latitude).
    Row,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Column => f.write_str("column"),
            Axis::Row => f.write_str("row"),
        }
    }
}

/// Errors that can occur when building or indexing a field.
///
/// Sampling a gap or a coordinate outside the grid is not an error; those
/// calls return `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// A grid-relative index is non-finite or outside `[0, n - 1]`.
    #[error("{axis} index {index} is outside the grid (0..={max})")]
    OutOfBounds { axis: Axis, index: f64, max: f64 },

    /// Sample array length does not match `nx * ny`.
    #[error("expected {expected} samples ({nx}x{ny}), got {actual}")]
    ShapeMismatch {
        nx: usize,
        ny: usize,
        expected: usize,
        actual: usize,
    },

    /// Origin, spacing or dimensions are unusable.
    #[error("invalid grid geometry: {0}")]
    InvalidGeometry(String),
}

impl FieldError {
    pub fn out_of_bounds(axis: Axis, index: f64, max: f64) -> Self {
        Self::OutOfBounds { axis, index, max }
    }

    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }
}

/// Result type for field operations.
pub type Result<T> = std::result::Result<T, FieldError>;
