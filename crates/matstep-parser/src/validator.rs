//! Structural validation of a flat token sequence.
//!
//! Rules are checked in a fixed order and the first violation is returned.
//! Validation looks only at neighbouring tokens; the tree builder reports
//! the defects these local rules cannot see.

use log::debug;
use matstep_types::{ErrorCode, MatstepError, Result, Token};

/// Check `tokens` for structural defects.
pub fn validate(tokens: &[Token]) -> Result<()> {
    let Some(first) = tokens.first() else {
        return Err(MatstepError::new(
            ErrorCode::EXPRESSION_REQUIRED,
            "expression required",
        ));
    };

    check_brackets(tokens)?;

    if tokens.len() == 1 {
        return check_lone_token(first);
    }

    if first.is_binary_operator() {
        return Err(binary_missing_operands(0));
    }

    for (i, pair) in tokens.windows(2).enumerate() {
        check_pair(&pair[0], &pair[1], i + 1)?;
    }

    let last = tokens.len() - 1;
    if tokens[last].is_unary_operator() {
        return Err(unary_missing_operand(last));
    }
    if tokens[last].is_binary_operator() {
        return Err(binary_missing_operands(last));
    }

    debug!("validated {} tokens", tokens.len());
    Ok(())
}

/// A close bracket seen before any other bracket fails immediately;
/// otherwise only the totals are compared.
fn check_brackets(tokens: &[Token]) -> Result<()> {
    let mut opens = 0usize;
    let mut closes = 0usize;
    let mut last_bracket = 0;

    for (i, bracket) in tokens
        .iter()
        .enumerate()
        .filter_map(|(i, t)| t.as_bracket().map(|b| (i, b)))
    {
        if opens == 0 && closes == 0 && !bracket.is_open() {
            return Err(MatstepError::new(
                ErrorCode::CLOSE_WITHOUT_OPEN,
                "close bracket without open bracket",
            )
            .at(i));
        }
        if bracket.is_open() {
            opens += 1;
        } else {
            closes += 1;
        }
        last_bracket = i;
    }

    if opens != closes {
        return Err(MatstepError::new(
            ErrorCode::UNBALANCED_BRACKETS,
            format!("unbalanced brackets: {opens} open, {closes} close"),
        )
        .at(last_bracket));
    }
    Ok(())
}

fn check_lone_token(token: &Token) -> Result<()> {
    match token {
        Token::Value(_) => Ok(()),
        Token::Operator(op) if op.is_unary() => Err(unary_missing_operand(0)),
        Token::Operator(_) => Err(binary_missing_operands(0)),
        Token::Bracket(_) => Err(MatstepError::new(
            ErrorCode::UNPAIRED_BRACKET,
            "unpaired bracket",
        )
        .at(0)),
    }
}

/// Rules over one pair of neighbours; `at` is the index of `current`.
fn check_pair(previous: &Token, current: &Token, at: usize) -> Result<()> {
    if previous.is_operator() && current.is_binary_operator() {
        return Err(binary_missing_operands(at));
    }
    if previous.is_value() && current.is_value() {
        return Err(MatstepError::new(
            ErrorCode::ADJACENT_OPERANDS,
            "two operands in a row need an operator between them",
        )
        .at(at));
    }
    if previous.is_unary_operator() && current.is_close_bracket() {
        return Err(unary_missing_operand(at - 1));
    }
    if previous.is_open_bracket() && current.is_close_bracket() {
        return Err(MatstepError::new(ErrorCode::EMPTY_BRACKETS, "empty brackets").at(at - 1));
    }
    Ok(())
}

pub(crate) fn unary_missing_operand(at: usize) -> MatstepError {
    MatstepError::new(
        ErrorCode::UNARY_MISSING_OPERAND,
        "unary operator requires an operand",
    )
    .at(at)
}

pub(crate) fn binary_missing_operands(at: usize) -> MatstepError {
    MatstepError::new(
        ErrorCode::BINARY_MISSING_OPERANDS,
        "binary operator requires two operands",
    )
    .at(at)
}
