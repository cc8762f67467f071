//! Leaf values: scalars and matrices over exact rationals.
//!
//! Magnitudes are stored as [`BigRational`] so row reduction, rank and
//! inverse are exact. How a value is shown is carried separately in its
//! [`DisplayMode`]; the mode never affects arithmetic.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while constructing a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// A matrix must have at least one row and one column.
    #[error("matrix must have at least one row and one column")]
    EmptyMatrix,

    /// Every row of a matrix must have the same length.
    #[error("matrix row {row} has {found} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Text that does not describe a number.
    #[error("invalid number: '{0}'")]
    InvalidNumber(String),
}

// ══════════════════════════════════════════════════════════════════════════════
// Display mode
// ══════════════════════════════════════════════════════════════════════════════

/// How a value is meant to be rendered downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// `n` or `n/d`.
    #[default]
    Fraction,
    /// Decimal approximation.
    Decimal,
    /// A fixed string that replaces the numeric rendering.
    Custom(String),
}

impl DisplayMode {
    /// Display mode for an answer computed from values in the given modes.
    ///
    /// Any decimal input makes the answer decimal; otherwise the answer is
    /// shown as a fraction. Custom text never carries over to an answer.
    pub fn resolve<'a>(modes: impl IntoIterator<Item = &'a DisplayMode>) -> DisplayMode {
        if modes.into_iter().any(|m| *m == DisplayMode::Decimal) {
            DisplayMode::Decimal
        } else {
            DisplayMode::Fraction
        }
    }

    /// Render a single rational in this mode.
    ///
    /// `Custom` has no per-number rendering and falls back to a fraction.
    pub fn format(&self, value: &BigRational) -> String {
        match self {
            DisplayMode::Decimal => format_decimal(value),
            DisplayMode::Fraction | DisplayMode::Custom(_) => format_fraction(value),
        }
    }
}

/// `n` for integers, `n/d` otherwise.
pub fn format_fraction(value: &BigRational) -> String {
    if value.is_integer() {
        value.numer().to_string()
    } else {
        format!("{}/{}", value.numer(), value.denom())
    }
}

/// Decimal rendering through an `f64` approximation.
///
/// Values too large for `f64` fall back to the fraction form.
pub fn format_decimal(value: &BigRational) -> String {
    match value.to_f64() {
        Some(f) if f.is_finite() => format!("{f}"),
        _ => format_fraction(value),
    }
}

/// Parse `"-3"`, `"3/4"` or `"1.25"` into an exact rational.
pub fn parse_rational(text: &str) -> Option<BigRational> {
    let text = text.trim();
    if let Some((numer, denom)) = text.split_once('/') {
        let numer: BigInt = numer.trim().parse().ok()?;
        let denom: BigInt = denom.trim().parse().ok()?;
        if denom.is_zero() {
            return None;
        }
        return Some(BigRational::new(numer, denom));
    }
    if let Some((whole, frac)) = text.split_once('.') {
        if frac.chars().any(|c| !c.is_ascii_digit()) {
            return None;
        }
        let numer: BigInt = format!("{whole}{frac}").parse().ok()?;
        let denom = num_traits::pow(BigInt::from(10), frac.len());
        return Some(BigRational::new(numer, denom));
    }
    let integer: BigInt = text.parse().ok()?;
    Some(BigRational::from_integer(integer))
}

/// The display mode implied by number text: decimal if it has a point.
fn mode_for_text(text: &str) -> DisplayMode {
    if text.contains('.') {
        DisplayMode::Decimal
    } else {
        DisplayMode::Fraction
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Scalar
// ══════════════════════════════════════════════════════════════════════════════

/// A single number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ScalarRepr", into = "ScalarRepr")]
pub struct Scalar {
    value: BigRational,
    display: DisplayMode,
}

impl Scalar {
    pub fn new(value: BigRational, display: DisplayMode) -> Self {
        Self { value, display }
    }

    /// An integer shown as a fraction.
    pub fn integer(n: i64) -> Self {
        Self::new(BigRational::from_integer(BigInt::from(n)), DisplayMode::Fraction)
    }

    /// `numer / denom` shown as a fraction. `None` if `denom` is zero.
    pub fn ratio(numer: i64, denom: i64) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        Some(Self::new(
            BigRational::new(BigInt::from(numer), BigInt::from(denom)),
            DisplayMode::Fraction,
        ))
    }

    /// Parse number text; a decimal point selects [`DisplayMode::Decimal`].
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        let value =
            parse_rational(text).ok_or_else(|| ValueError::InvalidNumber(text.to_string()))?;
        Ok(Self::new(value, mode_for_text(text)))
    }

    /// A value whose rendering is replaced by `text`.
    pub fn custom(value: BigRational, text: impl Into<String>) -> Self {
        Self::new(value, DisplayMode::Custom(text.into()))
    }

    pub fn value(&self) -> &BigRational {
        &self.value
    }

    pub fn display(&self) -> &DisplayMode {
        &self.display
    }

    /// The same magnitude in another display mode.
    pub fn with_display(&self, display: DisplayMode) -> Self {
        Self::new(self.value.clone(), display)
    }

    /// Rendered text in this scalar's display mode.
    pub fn display_text(&self) -> String {
        match &self.display {
            DisplayMode::Custom(text) => text.clone(),
            mode => mode.format(&self.value),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

#[derive(Serialize, Deserialize)]
struct ScalarRepr {
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display: Option<DisplayMode>,
}

impl TryFrom<ScalarRepr> for Scalar {
    type Error = ValueError;

    fn try_from(repr: ScalarRepr) -> Result<Self, Self::Error> {
        let value = parse_rational(&repr.value)
            .ok_or_else(|| ValueError::InvalidNumber(repr.value.clone()))?;
        let display = repr.display.unwrap_or_else(|| mode_for_text(&repr.value));
        Ok(Self::new(value, display))
    }
}

impl From<Scalar> for ScalarRepr {
    fn from(scalar: Scalar) -> Self {
        Self {
            value: format_fraction(&scalar.value),
            display: Some(scalar.display),
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Matrix
// ══════════════════════════════════════════════════════════════════════════════

/// A non-empty rectangular matrix, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr", into = "MatrixRepr")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    entries: Vec<BigRational>,
    display: DisplayMode,
}

impl Matrix {
    /// Build a matrix from row-major entries.
    pub fn new(
        rows: usize,
        cols: usize,
        entries: Vec<BigRational>,
        display: DisplayMode,
    ) -> Result<Self, ValueError> {
        if rows == 0 || cols == 0 {
            return Err(ValueError::EmptyMatrix);
        }
        if entries.len() != rows * cols {
            return Err(ValueError::RaggedRows {
                row: entries.len() / cols,
                expected: cols,
                found: entries.len() % cols,
            });
        }
        Ok(Self {
            rows,
            cols,
            entries,
            display,
        })
    }

    /// Build a matrix from a list of rows, shown as fractions.
    pub fn from_rows(rows: Vec<Vec<BigRational>>) -> Result<Self, ValueError> {
        let cols = rows.first().map_or(0, Vec::len);
        // Every row is checked before any entry is moved.
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(ValueError::RaggedRows {
                row: i,
                expected: cols,
                found: row.len(),
            });
        }
        let row_count = rows.len();
        let entries = rows.into_iter().flatten().collect();
        Self::new(row_count, cols, entries, DisplayMode::Fraction)
    }

    /// Build an integer matrix, shown as fractions.
    pub fn from_integers(rows: &[&[i64]]) -> Result<Self, ValueError> {
        Self::from_rows(
            rows.iter()
                .map(|row| {
                    row.iter()
                        .map(|&n| BigRational::from_integer(BigInt::from(n)))
                        .collect()
                })
                .collect(),
        )
    }

    /// The `n`×`n` identity matrix. `n` must be non-zero.
    pub fn identity(n: usize) -> Result<Self, ValueError> {
        let entries = (0..n * n)
            .map(|i| {
                if i / n == i % n {
                    BigRational::one()
                } else {
                    BigRational::zero()
                }
            })
            .collect();
        Self::new(n, n, entries, DisplayMode::Fraction)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Entry at row `r`, column `c` (both 0-based).
    ///
    /// # Panics
    /// Panics if the position is out of range.
    pub fn get(&self, r: usize, c: usize) -> &BigRational {
        &self.entries[r * self.cols + c]
    }

    /// One row as a slice.
    pub fn row(&self, r: usize) -> &[BigRational] {
        &self.entries[r * self.cols..(r + 1) * self.cols]
    }

    /// All entries, row-major.
    pub fn entries(&self) -> &[BigRational] {
        &self.entries
    }

    /// Copy out as a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<BigRational>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }

    pub fn display(&self) -> &DisplayMode {
        &self.display
    }

    /// The same entries in another display mode.
    pub fn with_display(&self, display: DisplayMode) -> Self {
        Self {
            display,
            ..self.clone()
        }
    }

    /// Rendered text, e.g. `[[1, 2], [3, 4]]`.
    pub fn display_text(&self) -> String {
        if let DisplayMode::Custom(text) = &self.display {
            return text.clone();
        }
        let rows: Vec<String> = (0..self.rows)
            .map(|r| {
                let cells: Vec<String> =
                    self.row(r).iter().map(|v| self.display.format(v)).collect();
                format!("[{}]", cells.join(", "))
            })
            .collect();
        format!("[{}]", rows.join(", "))
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

#[derive(Serialize, Deserialize)]
struct MatrixRepr {
    rows: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display: Option<DisplayMode>,
}

impl TryFrom<MatrixRepr> for Matrix {
    type Error = ValueError;

    fn try_from(repr: MatrixRepr) -> Result<Self, Self::Error> {
        let decimal = repr.rows.iter().flatten().any(|t| t.contains('.'));
        let rows = repr
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|t| parse_rational(t).ok_or_else(|| ValueError::InvalidNumber(t.clone())))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let display = repr.display.unwrap_or(if decimal {
            DisplayMode::Decimal
        } else {
            DisplayMode::Fraction
        });
        Ok(Self::from_rows(rows)?.with_display(display))
    }
}

impl From<Matrix> for MatrixRepr {
    fn from(matrix: Matrix) -> Self {
        Self {
            rows: matrix
                .to_rows()
                .iter()
                .map(|row| row.iter().map(format_fraction).collect())
                .collect(),
            display: Some(matrix.display),
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Value
// ══════════════════════════════════════════════════════════════════════════════

/// The two kinds of leaf value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Scalar,
    Matrix,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Matrix => write!(f, "matrix"),
        }
    }
}

/// A leaf value: no computation is needed to read it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Scalar(Scalar),
    Matrix(Matrix),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(_) => ValueKind::Scalar,
            Value::Matrix(_) => ValueKind::Matrix,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::Matrix(_) => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Value::Matrix(m) => Some(m),
            Value::Scalar(_) => None,
        }
    }

    pub fn display(&self) -> &DisplayMode {
        match self {
            Value::Scalar(s) => s.display(),
            Value::Matrix(m) => m.display(),
        }
    }

    pub fn display_text(&self) -> String {
        match self {
            Value::Scalar(s) => s.display_text(),
            Value::Matrix(m) => m.display_text(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Value::Matrix(m)
    }
}
