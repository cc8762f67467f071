//! Kernels built on Gauss-Jordan elimination: row reduction, rank,
//! column space, inverse and determinant.
//!
//! Elimination is exact. Every elementary row operation is recorded as a
//! step holding a snapshot of the matrix after the operation.

use crate::error::{KernelError, KernelResult};
use crate::written;
use log::trace;
use matstep_types::{DisplayMode, Matrix, Operator, Scalar, Solution, Step, Value};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

/// Outcome of reducing a matrix to reduced row echelon form.
struct Reduction {
    rows: Vec<Vec<BigRational>>,
    /// Columns that received a pivot, in order.
    pivot_columns: Vec<usize>,
    /// Pivot values before each pivot row was normalized.
    pivots: Vec<BigRational>,
    swaps: usize,
    steps: Vec<Step>,
}

impl Reduction {
    fn matrix(&self, display: &DisplayMode) -> KernelResult<Matrix> {
        Ok(Matrix::from_rows(self.rows.clone())?.with_display(display.clone()))
    }
}

/// Reduce `rows` to reduced row echelon form, pivoting only in the first
/// `pivot_limit` columns.
fn reduce(
    mut rows: Vec<Vec<BigRational>>,
    pivot_limit: usize,
    display: &DisplayMode,
) -> KernelResult<Reduction> {
    let height = rows.len();
    let mut pivot_columns = Vec::new();
    let mut pivots = Vec::new();
    let mut swaps = 0;
    let mut steps = Vec::new();

    let snapshot = |rows: &Vec<Vec<BigRational>>, note: String| -> KernelResult<Step> {
        let matrix = Matrix::from_rows(rows.clone())?.with_display(display.clone());
        Ok(Step::described(matrix, note))
    };

    let mut pivot_row = 0;
    for col in 0..pivot_limit {
        if pivot_row == height {
            break;
        }
        let Some(found) = (pivot_row..height).find(|&r| !rows[r][col].is_zero()) else {
            continue;
        };

        if found != pivot_row {
            rows.swap(found, pivot_row);
            swaps += 1;
            steps.push(snapshot(
                &rows,
                format!("R{} <-> R{}", pivot_row + 1, found + 1),
            )?);
        }

        let pivot = rows[pivot_row][col].clone();
        if !pivot.is_one() {
            let factor = pivot.recip();
            for v in rows[pivot_row].iter_mut() {
                *v *= &factor;
            }
            steps.push(snapshot(
                &rows,
                format!(
                    "R{} = {}R{}",
                    pivot_row + 1,
                    written::coefficient(&factor),
                    pivot_row + 1
                ),
            )?);
        }
        pivots.push(pivot);

        let pivot_values = rows[pivot_row].clone();
        for r in 0..height {
            if r == pivot_row || rows[r][col].is_zero() {
                continue;
            }
            let factor = rows[r][col].clone();
            for (v, p) in rows[r].iter_mut().zip(&pivot_values) {
                *v -= &factor * p;
            }
            steps.push(snapshot(&rows, eliminate_note(r, pivot_row, &factor))?);
        }

        pivot_columns.push(col);
        pivot_row += 1;
    }

    trace!(
        "row reduction finished: {} pivots, {} swaps, {} steps",
        pivot_columns.len(),
        swaps,
        steps.len()
    );
    Ok(Reduction {
        rows,
        pivot_columns,
        pivots,
        swaps,
        steps,
    })
}

/// `R2 = R2 - 3R1`, or `R2 = R2 + 3R1` for a negative factor.
fn eliminate_note(row: usize, pivot_row: usize, factor: &BigRational) -> String {
    let (sign, magnitude) = if *factor < BigRational::zero() {
        ("+", -factor)
    } else {
        ("-", factor.clone())
    };
    format!(
        "R{} = R{} {sign} {}R{}",
        row + 1,
        row + 1,
        written::coefficient(&magnitude),
        pivot_row + 1
    )
}

fn display_of(m: &Matrix) -> DisplayMode {
    DisplayMode::resolve([m.display()])
}

fn require_square(operation: &'static str, m: &Matrix) -> KernelResult<()> {
    if m.is_square() {
        Ok(())
    } else {
        Err(KernelError::NotSquare {
            operation,
            rows: m.rows(),
            cols: m.cols(),
        })
    }
}

fn count_scalar(n: usize, display: DisplayMode) -> Scalar {
    Scalar::new(BigRational::from_integer(BigInt::from(n)), display)
}

// ══════════════════════════════════════════════════════════════════════════════
// Kernels
// ══════════════════════════════════════════════════════════════════════════════

/// Reduced row echelon form.
pub fn row_reduce(m: &Matrix) -> KernelResult<Solution> {
    let display = display_of(m);
    let reduction = reduce(m.to_rows(), m.cols(), &display)?;
    let answer = reduction.matrix(&display)?;
    Ok(Solution::new(
        Operator::RowReduce,
        vec![Value::Matrix(m.clone())],
        Value::Matrix(answer),
        reduction.steps,
    ))
}

/// Number of pivot columns.
pub fn rank(m: &Matrix) -> KernelResult<Solution> {
    let display = display_of(m);
    let reduction = reduce(m.to_rows(), m.cols(), &display)?;
    let rank = reduction.pivot_columns.len();

    let mut steps = reduction.steps.clone();
    steps.push(Step::described(
        reduction.matrix(&display)?,
        format!("{rank} pivot column{}", if rank == 1 { "" } else { "s" }),
    ));
    Ok(Solution::new(
        Operator::Rank,
        vec![Value::Matrix(m.clone())],
        Value::Scalar(count_scalar(rank, display)),
        steps,
    ))
}

/// Basis of the column space: the pivot columns of the input.
///
/// The zero matrix has no pivot columns; its column space is spanned by a
/// single zero column.
pub fn column_space(m: &Matrix) -> KernelResult<Solution> {
    let display = display_of(m);
    let reduction = reduce(m.to_rows(), m.cols(), &display)?;
    let basis = &reduction.pivot_columns;

    let answer = if basis.is_empty() {
        Matrix::new(
            m.rows(),
            1,
            vec![BigRational::zero(); m.rows()],
            display.clone(),
        )?
    } else {
        let entries = (0..m.rows())
            .flat_map(|r| basis.iter().map(move |&c| m.get(r, c).clone()))
            .collect();
        Matrix::new(m.rows(), basis.len(), entries, display.clone())?
    };

    let note = if basis.is_empty() {
        "no pivot columns; the column space is the zero vector".to_string()
    } else {
        let cols: Vec<String> = basis.iter().map(|c| (c + 1).to_string()).collect();
        format!("pivot columns: {}", cols.join(", "))
    };
    let mut steps = reduction.steps.clone();
    steps.push(Step::described(reduction.matrix(&display)?, note));

    Ok(Solution::new(
        Operator::ColumnSpace,
        vec![Value::Matrix(m.clone())],
        Value::Matrix(answer),
        steps,
    ))
}

/// Inverse by reducing `[A | I]` to `[I | A^-1]`.
pub fn inverse(m: &Matrix) -> KernelResult<Solution> {
    require_square("inverse", m)?;
    let display = display_of(m);
    let n = m.rows();

    let augmented: Vec<Vec<BigRational>> = (0..n)
        .map(|r| {
            let mut row = m.row(r).to_vec();
            row.extend((0..n).map(|c| {
                if r == c {
                    BigRational::one()
                } else {
                    BigRational::zero()
                }
            }));
            row
        })
        .collect();

    let mut steps = vec![Step::described(
        Matrix::from_rows(augmented.clone())?.with_display(display.clone()),
        "augment with the identity matrix",
    )];
    let reduction = reduce(augmented, n, &display)?;
    if reduction.pivot_columns.len() < n {
        return Err(KernelError::Singular);
    }
    steps.extend(reduction.steps);

    let entries = reduction
        .rows
        .iter()
        .flat_map(|row| row[n..].iter().cloned())
        .collect();
    let answer = Matrix::new(n, n, entries, display)?;
    Ok(Solution::new(
        Operator::Inverse,
        vec![Value::Matrix(m.clone())],
        Value::Matrix(answer),
        steps,
    ))
}

/// Determinant: the signed product of the pivots found while reducing to
/// the identity, or zero when a column has no pivot.
pub fn determinant(m: &Matrix) -> KernelResult<Solution> {
    require_square("determinant", m)?;
    let display = display_of(m);
    let n = m.rows();
    let reduction = reduce(m.to_rows(), n, &display)?;

    let (det, note) = if reduction.pivot_columns.len() < n {
        (
            BigRational::zero(),
            "a column has no pivot, so the determinant is 0".to_string(),
        )
    } else {
        let mut det = reduction
            .pivots
            .iter()
            .fold(BigRational::one(), |acc, p| acc * p);
        if reduction.swaps % 2 == 1 {
            det = -det;
        }
        let factors: Vec<String> = reduction
            .pivots
            .iter()
            .map(|p| written::operand(p, &display))
            .collect();
        (
            det,
            format!(
                "det = (-1)^{} * {}",
                reduction.swaps,
                factors.join(" * ")
            ),
        )
    };

    let mut steps = reduction.steps;
    steps.push(Step::described(
        Scalar::custom(det.clone(), note.clone()),
        note,
    ));
    Ok(Solution::new(
        Operator::Determinant,
        vec![Value::Matrix(m.clone())],
        Value::Scalar(Scalar::new(det, display)),
        steps,
    ))
}
