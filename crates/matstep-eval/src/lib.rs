//! matstep evaluator: dispatches each operation of the operator tree to its
//! numeric kernel and assembles the result tree.
//!
//! Evaluation is post-order. Operand kinds are checked against the kernel
//! bound to each operator before it runs, and the first failure ends the
//! call.

mod dispatch;
mod evaluator;

pub use dispatch::{kernel_for, Kernel};
pub use evaluator::{evaluate, Evaluator};
