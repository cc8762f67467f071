//! Written-out forms used in step snapshots.

use matstep_types::DisplayMode;
use num_rational::BigRational;
use num_traits::{One, Signed};

/// A number as it appears inside a written expression; negatives are
/// parenthesized so `4 - (-2)` reads unambiguously.
pub(crate) fn operand(value: &BigRational, display: &DisplayMode) -> String {
    let text = display.format(value);
    if value.is_negative() {
        format!("({text})")
    } else {
        text
    }
}

/// `[[a, b], [c, d]]` with each cell produced by `cell(row, col)`.
pub(crate) fn grid(rows: usize, cols: usize, cell: impl Fn(usize, usize) -> String) -> String {
    let rows: Vec<String> = (0..rows)
        .map(|r| {
            let cells: Vec<String> = (0..cols).map(|c| cell(r, c)).collect();
            format!("[{}]", cells.join(", "))
        })
        .collect();
    format!("[{}]", rows.join(", "))
}

/// A row-operation coefficient: `""` for 1, `"-"` for -1, `"3"` for
/// integers and `"(1/2)"` otherwise.
pub(crate) fn coefficient(value: &BigRational) -> String {
    if value.is_one() {
        String::new()
    } else if (-value).is_one() {
        "-".to_string()
    } else if value.is_integer() {
        value.numer().to_string()
    } else {
        format!("({}/{})", value.numer(), value.denom())
    }
}
