//! Numeric kernels for matstep.
//!
//! Every kernel takes correctly typed operands and returns a
//! [`Solution`](matstep_types::Solution): the answer plus the intermediate
//! snapshots a student would write down. Arithmetic is exact over
//! arbitrary-precision rationals.
//!
//! Kernels never see operand-type errors; the evaluator checks operand kinds
//! before dispatching. A kernel fails only for reasons of the values
//! themselves (shape, singularity, division by zero).

mod error;
pub mod matrix;
pub mod reduce;
pub mod scalar;
mod written;

pub use error::{KernelError, KernelResult};
pub use matrix::ScalarSide;
