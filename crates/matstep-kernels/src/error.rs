//! Kernel error types.

use matstep_types::ValueError;
use thiserror::Error;

/// Errors a kernel raises when it rejects correctly typed operands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    /// Operand shapes are incompatible for the operation.
    #[error(
        "cannot {operation} a {left_rows}x{left_cols} matrix and a {right_rows}x{right_cols} matrix"
    )]
    DimensionMismatch {
        operation: &'static str,
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    /// Scalar division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The operation is only defined for square matrices.
    #[error("{operation} requires a square matrix, got {rows}x{cols}")]
    NotSquare {
        operation: &'static str,
        rows: usize,
        cols: usize,
    },

    /// The matrix has no inverse.
    #[error("matrix is singular and has no inverse")]
    Singular,

    /// A result value could not be constructed.
    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Kernel result type alias.
pub type KernelResult<T> = Result<T, KernelError>;
