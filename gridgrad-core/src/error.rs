use crate::types::DType;
use thiserror::Error;

/// Custom error type for the gridgrad engine.
///
/// Every variant is raised eagerly at the point of the call, before any
/// output value or gradient function is built.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum GridGradError {
    #[error("Shape mismatch during operation {operation}: {lhs:?} and {rhs:?}")]
    ShapeMismatch {
        operation: String,
        lhs: Vec<usize>,
        rhs: Vec<usize>,
    },

    #[error("Ragged matrix data: row {row} has {actual} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Matrix data must contain at least one row and one column")]
    EmptyMatrix,

    #[error("Data type mismatch during operation {operation}: expected {expected:?}, got {actual:?}")]
    TypeMismatch {
        operation: String,
        expected: DType,
        actual: DType,
    },

    #[error("Operation {operation} requires the value to require grad, but it doesn't.")]
    RequiresGradNotMet { operation: String },

    #[error("Index out of bounds: index {index} for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl GridGradError {
    /// True for every error raised because operand or construction shapes are invalid.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            GridGradError::ShapeMismatch { .. }
                | GridGradError::RaggedRows { .. }
                | GridGradError::EmptyMatrix
        )
    }
}
