//! Operator to kernel binding.
//!
//! [`kernel_for`] is an exhaustive match over [`Operator`]: adding a catalog
//! entry does not compile until it is bound here, either to a kernel or
//! explicitly to `None`.

use matstep_kernels::{matrix, reduce, scalar, KernelResult, ScalarSide};
use matstep_types::{Matrix, MatstepError, Operator, Result, Scalar, Solution, Value};

type ScalarBinaryFn = fn(&Scalar, &Scalar) -> KernelResult<Solution>;
type MatrixBinaryFn = fn(&Matrix, &Matrix) -> KernelResult<Solution>;
type ScalarMatrixFn = fn(&Scalar, &Matrix, ScalarSide) -> KernelResult<Solution>;
type MatrixUnaryFn = fn(&Matrix) -> KernelResult<Solution>;

/// A kernel entry point, tagged by the operand kinds it accepts.
#[derive(Clone, Copy)]
pub enum Kernel {
    ScalarBinary(ScalarBinaryFn),
    MatrixBinary(MatrixBinaryFn),
    /// One scalar and one matrix, in either order.
    ScalarMatrix(ScalarMatrixFn),
    MatrixUnary(MatrixUnaryFn),
}

/// The kernel bound to `operator`, or `None` if it has no kernel yet.
pub fn kernel_for(operator: Operator) -> Option<Kernel> {
    use Kernel::*;
    let kernel = match operator {
        Operator::ScalarPlus => ScalarBinary(scalar::plus),
        Operator::ScalarMinus => ScalarBinary(scalar::minus),
        Operator::ScalarMultiply => ScalarBinary(scalar::multiply),
        Operator::ScalarDivide => ScalarBinary(scalar::divide),
        Operator::ScalarMatrixMultiply => ScalarMatrix(matrix::scale),
        Operator::MatrixPlus => MatrixBinary(matrix::plus),
        Operator::MatrixMinus => MatrixBinary(matrix::minus),
        Operator::MatrixMultiply => MatrixBinary(matrix::multiply),
        Operator::Determinant => MatrixUnary(reduce::determinant),
        Operator::RowReduce => MatrixUnary(reduce::row_reduce),
        Operator::Rank => MatrixUnary(reduce::rank),
        Operator::Transpose => MatrixUnary(matrix::transpose),
        Operator::Inverse => MatrixUnary(reduce::inverse),
        Operator::ColumnSpace => MatrixUnary(reduce::column_space),
        Operator::ScalarPower | Operator::MatrixPower | Operator::NullSpace => return None,
    };
    Some(kernel)
}

impl Kernel {
    /// The operand kinds this kernel accepts, as written in error messages.
    pub fn expects(&self) -> &'static str {
        match self {
            Kernel::ScalarBinary(_) => "two scalars",
            Kernel::MatrixBinary(_) => "two matrices",
            Kernel::ScalarMatrix(_) => "one scalar and one matrix",
            Kernel::MatrixUnary(_) => "a matrix",
        }
    }

    /// Type-check the resolved operands and run the kernel.
    ///
    /// `first` is `None` for unary operators. Kernel errors are re-signaled
    /// as kernel failures carrying the kernel's message.
    pub fn apply(&self, operator: Operator, first: Option<&Value>, second: &Value) -> Result<Solution> {
        let result = match (self, first, second) {
            (Kernel::ScalarBinary(f), Some(Value::Scalar(a)), Value::Scalar(b)) => f(a, b),
            (Kernel::MatrixBinary(f), Some(Value::Matrix(a)), Value::Matrix(b)) => f(a, b),
            (Kernel::ScalarMatrix(f), Some(Value::Scalar(s)), Value::Matrix(m)) => {
                f(s, m, ScalarSide::Left)
            }
            (Kernel::ScalarMatrix(f), Some(Value::Matrix(m)), Value::Scalar(s)) => {
                f(s, m, ScalarSide::Right)
            }
            (Kernel::MatrixUnary(f), None, Value::Matrix(m)) => f(m),
            _ => {
                return Err(MatstepError::invalid_operand_type(
                    operator,
                    self.expects(),
                    &describe(first, second),
                ))
            }
        };
        result.map_err(|e| MatstepError::kernel_failure(operator, e.to_string()))
    }
}

/// `"a scalar and a matrix"`, `"a scalar"`.
fn describe(first: Option<&Value>, second: &Value) -> String {
    match first {
        Some(first) => format!("a {} and a {}", first.kind(), second.kind()),
        None => format!("a {}", second.kind()),
    }
}
