//! Scalar arithmetic kernels.

use crate::error::{KernelError, KernelResult};
use crate::written;
use matstep_types::{DisplayMode, Operator, Scalar, Solution, Step, Value};
use num_rational::BigRational;
use num_traits::Zero;

/// `a + b`.
pub fn plus(a: &Scalar, b: &Scalar) -> KernelResult<Solution> {
    combine(Operator::ScalarPlus, a, b, |x, y| Ok(x + y))
}

/// `a - b`.
pub fn minus(a: &Scalar, b: &Scalar) -> KernelResult<Solution> {
    combine(Operator::ScalarMinus, a, b, |x, y| Ok(x - y))
}

/// `a * b`.
pub fn multiply(a: &Scalar, b: &Scalar) -> KernelResult<Solution> {
    combine(Operator::ScalarMultiply, a, b, |x, y| Ok(x * y))
}

/// `a / b`. Fails when `b` is zero.
pub fn divide(a: &Scalar, b: &Scalar) -> KernelResult<Solution> {
    combine(Operator::ScalarDivide, a, b, |x, y| {
        if y.is_zero() {
            Err(KernelError::DivisionByZero)
        } else {
            Ok(x / y)
        }
    })
}

/// Shared body of the binary scalar kernels: operands written out, then
/// the answer.
fn combine(
    operator: Operator,
    a: &Scalar,
    b: &Scalar,
    apply: impl FnOnce(&BigRational, &BigRational) -> KernelResult<BigRational>,
) -> KernelResult<Solution> {
    let display = DisplayMode::resolve([a.display(), b.display()]);
    let value = apply(a.value(), b.value())?;

    let written = format!(
        "{} {} {}",
        written::operand(a.value(), &display),
        operator.symbol(),
        written::operand(b.value(), &display)
    );
    let steps = vec![Step::new(Scalar::custom(value.clone(), written))];

    Ok(Solution::new(
        operator,
        vec![Value::Scalar(a.clone()), Value::Scalar(b.clone())],
        Value::Scalar(Scalar::new(value, display)),
        steps,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Scalar {
        Scalar::integer(n)
    }

    fn answer_text(sol: &Solution) -> String {
        sol.answer().to_string()
    }

    #[test]
    fn test_plus_writes_operands_then_answer() {
        let sol = plus(&int(4), &int(2)).unwrap();
        assert_eq!(sol.operator(), Operator::ScalarPlus);
        assert_eq!(answer_text(&sol), "6");
        let shown: Vec<String> = sol.steps().iter().map(|s| s.value.to_string()).collect();
        assert_eq!(shown, vec!["4 + 2", "6"]);
        assert_eq!(sol.inputs().len(), 2);
    }

    #[test]
    fn test_minus_parenthesizes_negative_operand() {
        let sol = minus(&int(4), &int(-2)).unwrap();
        assert_eq!(sol.steps()[0].value.to_string(), "4 - (-2)");
        assert_eq!(answer_text(&sol), "6");
    }

    #[test]
    fn test_divide_is_exact() {
        let sol = divide(&int(1), &int(3)).unwrap();
        assert_eq!(answer_text(&sol), "1/3");
        let sol = multiply(&Scalar::ratio(2, 3).unwrap(), &int(3)).unwrap();
        assert_eq!(answer_text(&sol), "2");
    }

    #[test]
    fn test_divide_by_zero_fails() {
        assert_eq!(divide(&int(1), &int(0)), Err(KernelError::DivisionByZero));
    }

    #[test]
    fn test_decimal_operand_makes_decimal_answer() {
        let half = Scalar::parse("0.5").unwrap();
        let sol = plus(&half, &Scalar::ratio(1, 4).unwrap()).unwrap();
        assert_eq!(sol.answer().display(), &DisplayMode::Decimal);
        assert_eq!(answer_text(&sol), "0.75");
        assert_eq!(sol.steps()[0].value.to_string(), "0.5 + 0.25");
    }

    #[test]
    fn test_inputs_keep_original_display() {
        let half = Scalar::parse("0.5").unwrap();
        let quarter = Scalar::ratio(1, 4).unwrap();
        let sol = plus(&half, &quarter).unwrap();
        assert_eq!(sol.inputs()[1], Value::Scalar(quarter));
    }
}
