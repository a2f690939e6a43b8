use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::Shape;
use crate::ops::Operation;

/// Failure reported by any matrix operation at the boundary.
///
/// Every variant carries enough context (row index or operand shapes) to
/// render a self-contained message for the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Input rows of inconsistent length.
    Shape {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Operand shapes incompatible for the requested operation.
    DimensionMismatch {
        op: Operation,
        lhs: Shape,
        rhs: Shape,
    },
    /// Storage for a `rows x cols` buffer could not be reserved.
    Allocation { rows: usize, cols: usize },
    /// A matrix (`row == None`) or one of its rows was absent.
    NullInput { row: Option<usize> },
    /// A flat buffer whose length does not equal `rows * cols`.
    BufferLength { rows: usize, cols: usize, len: usize },
    /// Any other failure, e.g. a panic caught at the boundary.
    Internal { message: String },
}

/// Coarse classification of a [`MatrixError`], stable across messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Shape,
    DimensionMismatch,
    Allocation,
    NullInput,
    Internal,
}

impl MatrixError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::Shape { .. } => ErrorKind::Shape,
            MatrixError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            MatrixError::Allocation { .. } => ErrorKind::Allocation,
            MatrixError::NullInput { .. } => ErrorKind::NullInput,
            MatrixError::BufferLength { .. } | MatrixError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Only resource exhaustion may succeed when the same call is repeated.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Allocation
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        MatrixError::Internal {
            message: message.into(),
        }
    }
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatrixError::Shape {
                row,
                expected,
                found,
            } => write!(
                f,
                "Inconsistent column count in matrix at row {}: expected {}, found {}",
                row, expected, found
            ),
            MatrixError::DimensionMismatch { op, lhs, rhs } => match op {
                Operation::Multiply => write!(
                    f,
                    "Matrix dimensions incompatible for multiplication ({} vs {}): A.cols {} != B.rows {}",
                    lhs, rhs, lhs.cols, rhs.rows
                ),
                _ => write!(
                    f,
                    "Matrix dimensions must match for {} ({} vs {})",
                    op.noun(),
                    lhs,
                    rhs
                ),
            },
            MatrixError::Allocation { rows, cols } => {
                write!(f, "Failed to allocate storage for a {}x{} matrix", rows, cols)
            }
            MatrixError::NullInput { row: Some(row) } => write!(f, "Row {} of matrix is null", row),
            MatrixError::NullInput { row: None } => write!(f, "Matrix is null"),
            MatrixError::BufferLength { rows, cols, len } => write!(
                f,
                "invalid shape ({}, {}) for buffer of length {}",
                rows, cols, len
            ),
            MatrixError::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl Error for MatrixError {}
