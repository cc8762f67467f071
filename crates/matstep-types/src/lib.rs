//! Shared types for matstep.
//!
//! This crate defines the operand model (values, operators, brackets),
//! the operator tree, evaluation results and the error type used across
//! all pipeline stages.

mod error;
mod operator;
mod solution;
mod token;
mod tree;
mod value;

pub use error::{ErrorCode, ErrorKind, MatstepError};
pub use operator::{Arity, Operator, OperatorInfo};
pub use solution::{ResultNode, Solution, Step};
pub use token::{Bracket, Token};
pub use tree::{Node, OperationNode};
pub use value::{
    format_decimal, format_fraction, parse_rational, DisplayMode, Matrix, Scalar, ValueError,
    ValueKind, Value,
};

/// Result type used throughout matstep.
pub type Result<T> = std::result::Result<T, MatstepError>;
