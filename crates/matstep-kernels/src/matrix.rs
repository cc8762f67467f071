//! Elementwise and product kernels over matrices.

use crate::error::{KernelError, KernelResult};
use crate::written;
use matstep_types::{DisplayMode, Matrix, Operator, Scalar, Solution, Step, Value};
use num_rational::BigRational;
use num_traits::Zero;

/// Which side of a scalar-matrix product the scalar was written on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarSide {
    Left,
    Right,
}

/// `a + b`, entrywise.
pub fn plus(a: &Matrix, b: &Matrix) -> KernelResult<Solution> {
    entrywise(Operator::MatrixPlus, "add", a, b, |x, y| x + y)
}

/// `a - b`, entrywise.
pub fn minus(a: &Matrix, b: &Matrix) -> KernelResult<Solution> {
    entrywise(Operator::MatrixMinus, "subtract", a, b, |x, y| x - y)
}

fn entrywise(
    operator: Operator,
    verb: &'static str,
    a: &Matrix,
    b: &Matrix,
    apply: impl Fn(&BigRational, &BigRational) -> BigRational,
) -> KernelResult<Solution> {
    if a.shape() != b.shape() {
        return Err(mismatch(verb, a, b));
    }
    let display = DisplayMode::resolve([a.display(), b.display()]);
    let (rows, cols) = a.shape();

    let entries = a
        .entries()
        .iter()
        .zip(b.entries())
        .map(|(x, y)| apply(x, y))
        .collect();
    let answer = Matrix::new(rows, cols, entries, display.clone())?;

    let text = written::grid(rows, cols, |r, c| {
        format!(
            "{} {} {}",
            written::operand(a.get(r, c), &display),
            operator.symbol(),
            written::operand(b.get(r, c), &display)
        )
    });
    let steps = vec![Step::new(answer.with_display(DisplayMode::Custom(text)))];

    Ok(Solution::new(
        operator,
        vec![Value::Matrix(a.clone()), Value::Matrix(b.clone())],
        Value::Matrix(answer),
        steps,
    ))
}

/// `a * b`: each entry is a row of `a` dotted with a column of `b`.
pub fn multiply(a: &Matrix, b: &Matrix) -> KernelResult<Solution> {
    if a.cols() != b.rows() {
        return Err(mismatch("multiply", a, b));
    }
    let display = DisplayMode::resolve([a.display(), b.display()]);
    let (rows, cols, inner) = (a.rows(), b.cols(), a.cols());

    let mut entries = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let mut sum = BigRational::zero();
            for k in 0..inner {
                sum += a.get(r, k) * b.get(k, c);
            }
            entries.push(sum);
        }
    }
    let answer = Matrix::new(rows, cols, entries, display.clone())?;

    let text = written::grid(rows, cols, |r, c| {
        (0..inner)
            .map(|k| {
                format!(
                    "{}*{}",
                    written::operand(a.get(r, k), &display),
                    written::operand(b.get(k, c), &display)
                )
            })
            .collect::<Vec<_>>()
            .join(" + ")
    });
    let steps = vec![Step::described(
        answer.with_display(DisplayMode::Custom(text)),
        "each entry is a row of the left matrix times a column of the right matrix",
    )];

    Ok(Solution::new(
        Operator::MatrixMultiply,
        vec![Value::Matrix(a.clone()), Value::Matrix(b.clone())],
        Value::Matrix(answer),
        steps,
    ))
}

/// Multiply every entry of `m` by `s`. Inputs are recorded in the order
/// they were written.
pub fn scale(s: &Scalar, m: &Matrix, side: ScalarSide) -> KernelResult<Solution> {
    let display = DisplayMode::resolve([s.display(), m.display()]);
    let (rows, cols) = m.shape();

    let entries = m.entries().iter().map(|x| s.value() * x).collect();
    let answer = Matrix::new(rows, cols, entries, display.clone())?;

    let factor = written::operand(s.value(), &display);
    let text = written::grid(rows, cols, |r, c| {
        format!("{factor}*{}", written::operand(m.get(r, c), &display))
    });
    let steps = vec![Step::new(answer.with_display(DisplayMode::Custom(text)))];

    let inputs = match side {
        ScalarSide::Left => vec![Value::Scalar(s.clone()), Value::Matrix(m.clone())],
        ScalarSide::Right => vec![Value::Matrix(m.clone()), Value::Scalar(s.clone())],
    };
    Ok(Solution::new(
        Operator::ScalarMatrixMultiply,
        inputs,
        Value::Matrix(answer),
        steps,
    ))
}

/// Swap rows and columns.
pub fn transpose(m: &Matrix) -> KernelResult<Solution> {
    let display = DisplayMode::resolve([m.display()]);
    let (rows, cols) = m.shape();

    let entries = (0..cols)
        .flat_map(|c| (0..rows).map(move |r| m.get(r, c).clone()))
        .collect();
    let answer = Matrix::new(cols, rows, entries, display.clone())?;

    let steps = vec![Step::described(
        m.with_display(display),
        format!("row i of the input becomes column i of the {cols}x{rows} result"),
    )];

    Ok(Solution::new(
        Operator::Transpose,
        vec![Value::Matrix(m.clone())],
        Value::Matrix(answer),
        steps,
    ))
}

fn mismatch(operation: &'static str, a: &Matrix, b: &Matrix) -> KernelError {
    KernelError::DimensionMismatch {
        operation,
        left_rows: a.rows(),
        left_cols: a.cols(),
        right_rows: b.rows(),
        right_cols: b.cols(),
    }
}
