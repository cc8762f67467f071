//! Error-path tests for the matstep parser.
//!
//! Covers:
//! 1. Every malformed-expression code the validator raises
//! 2. Defects only the tree builder can see
//! 3. Reported token positions

use matstep_parser::{build_tree, parse, validate};
use matstep_types::{ErrorCode, ErrorKind, MatstepError, Matrix, Operator, Scalar, Token};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn num(n: i64) -> Token {
    Token::scalar(Scalar::integer(n))
}

fn mat(n: i64) -> Token {
    Token::matrix(Matrix::from_integers(&[&[n]]).expect("1x1 matrix"))
}

fn op(o: Operator) -> Token {
    o.into()
}

fn open() -> Token {
    Token::open()
}

fn close() -> Token {
    Token::close()
}

fn parse_err(tokens: &[Token]) -> MatstepError {
    match parse(tokens) {
        Ok(tree) => panic!("expected an error, got {tree}"),
        Err(e) => e,
    }
}

// ─────────────────────────────────────────────────────────────────────
// Validator codes
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_e100_expression_required() {
    let err = parse_err(&[]);
    assert_eq!(err.code, ErrorCode::EXPRESSION_REQUIRED);
    assert_eq!(err.kind, ErrorKind::MalformedExpression);
    assert_eq!(err.position, None);
}

#[test]
fn test_e101_close_without_open() {
    let err = parse_err(&[close(), num(1), open()]);
    assert_eq!(err.code, ErrorCode::CLOSE_WITHOUT_OPEN);
    assert_eq!(err.position, Some(0));
}

#[test]
fn test_e102_unbalanced_regardless_of_content() {
    let cases: Vec<Vec<Token>> = vec![
        vec![open()],
        vec![open(), num(1)],
        vec![open(), open(), num(1), close()],
        vec![open(), mat(1), op(Operator::MatrixPlus), mat(2), close(), close()],
        vec![op(Operator::Determinant), open(), mat(1)],
    ];
    for tokens in &cases {
        assert_eq!(
            parse_err(tokens).code,
            ErrorCode::UNBALANCED_BRACKETS,
            "{tokens:?}"
        );
    }
}

#[test]
fn test_e103_lone_bracket() {
    // In a full sequence the bracket-count rules fire first.
    assert_eq!(parse_err(&[open()]).code, ErrorCode::UNBALANCED_BRACKETS);
    assert_eq!(parse_err(&[close()]).code, ErrorCode::CLOSE_WITHOUT_OPEN);
    let err = build_tree(&[open()]).unwrap_err();
    assert_eq!(err.code, ErrorCode::UNPAIRED_BRACKET);
    assert_eq!(err.position, Some(0));
}

#[test]
fn test_e104_unary_missing_operand() {
    assert_eq!(
        parse_err(&[op(Operator::Inverse)]).code,
        ErrorCode::UNARY_MISSING_OPERAND
    );
    assert_eq!(
        parse_err(&[mat(1), op(Operator::MatrixPlus), op(Operator::Transpose)]).code,
        ErrorCode::UNARY_MISSING_OPERAND
    );
    let err = parse_err(&[open(), op(Operator::Rank), close()]);
    assert_eq!(err.code, ErrorCode::UNARY_MISSING_OPERAND);
    assert_eq!(err.position, Some(1));
}

#[test]
fn test_e105_binary_missing_operands() {
    let cases: Vec<Vec<Token>> = vec![
        vec![op(Operator::ScalarPlus)],
        vec![op(Operator::ScalarPlus), num(1)],
        vec![num(1), op(Operator::ScalarPlus)],
        vec![num(1), op(Operator::ScalarPlus), op(Operator::ScalarMinus), num(2)],
        vec![op(Operator::Determinant), op(Operator::MatrixPlus), mat(1)],
    ];
    for tokens in &cases {
        assert_eq!(
            parse_err(tokens).code,
            ErrorCode::BINARY_MISSING_OPERANDS,
            "{tokens:?}"
        );
    }
}

#[test]
fn test_binary_then_unary_is_valid() {
    let tokens = [
        num(2),
        op(Operator::ScalarMultiply),
        op(Operator::Determinant),
        mat(3),
    ];
    assert!(validate(&tokens).is_ok());
}

#[test]
fn test_e106_adjacent_operands() {
    let err = parse_err(&[num(1), op(Operator::ScalarPlus), num(2), num(3)]);
    assert_eq!(err.code, ErrorCode::ADJACENT_OPERANDS);
    assert_eq!(err.position, Some(3));
    assert_eq!(parse_err(&[mat(1), mat(2)]).code, ErrorCode::ADJACENT_OPERANDS);
}

#[test]
fn test_e107_empty_brackets() {
    let err = parse_err(&[open(), close()]);
    assert_eq!(err.code, ErrorCode::EMPTY_BRACKETS);
    assert_eq!(err.position, Some(0));

    let err = parse_err(&[num(1), op(Operator::ScalarPlus), open(), close()]);
    assert_eq!(err.code, ErrorCode::EMPTY_BRACKETS);
    assert_eq!(err.position, Some(2));
}

// ─────────────────────────────────────────────────────────────────────
// Builder-only defects
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_e108_value_left_of_unary_operator() {
    let tokens = [mat(1), op(Operator::Determinant), mat(2)];
    assert!(validate(&tokens).is_ok());
    let err = parse_err(&tokens);
    assert_eq!(err.code, ErrorCode::UNEXPECTED_LEFT_OPERAND);
    assert_eq!(err.position, Some(1));
    assert_eq!(err.operator, Some(Operator::Determinant));
}

#[test]
fn test_binary_with_empty_side_inside_brackets() {
    let tokens = [open(), op(Operator::ScalarPlus), num(1), close()];
    assert!(validate(&tokens).is_ok());
    let err = parse_err(&tokens);
    assert_eq!(err.code, ErrorCode::BINARY_MISSING_OPERANDS);
    assert_eq!(err.position, Some(1));

    let tokens = [
        open(),
        num(1),
        op(Operator::ScalarPlus),
        close(),
        op(Operator::ScalarMultiply),
        num(2),
    ];
    assert!(validate(&tokens).is_ok());
    let err = parse_err(&tokens);
    assert_eq!(err.code, ErrorCode::BINARY_MISSING_OPERANDS);
    assert_eq!(err.position, Some(2));
}

#[test]
fn test_adjacent_groups_have_no_operator() {
    let tokens = [open(), num(1), close(), open(), num(2), close()];
    assert!(validate(&tokens).is_ok());
    assert_eq!(parse_err(&tokens).code, ErrorCode::ADJACENT_OPERANDS);
}

#[test]
fn test_group_defect_reported_before_missing_operator() {
    let tokens = [
        mat(1),
        open(),
        op(Operator::MatrixPlus),
        mat(2),
        close(),
    ];
    assert!(validate(&tokens).is_ok());
    let err = parse_err(&tokens);
    assert_eq!(err.code, ErrorCode::BINARY_MISSING_OPERANDS);
    assert_eq!(err.position, Some(2));
    assert_eq!(err.operator, Some(Operator::MatrixPlus));
}

#[test]
fn test_value_beside_sound_group_has_no_operator() {
    let tokens = [
        mat(1),
        open(),
        mat(2),
        op(Operator::MatrixPlus),
        mat(3),
        close(),
    ];
    assert!(validate(&tokens).is_ok());
    assert_eq!(parse_err(&tokens).code, ErrorCode::ADJACENT_OPERANDS);
}

#[test]
fn test_lone_operator_in_brackets() {
    let tokens = [open(), op(Operator::ScalarMinus), close()];
    assert!(validate(&tokens).is_ok());
    let err = parse_err(&tokens);
    assert_eq!(err.code, ErrorCode::BINARY_MISSING_OPERANDS);
    assert_eq!(err.position, Some(1));
}

#[test]
fn test_builder_reports_defects_without_validation() {
    assert_eq!(
        build_tree(&[num(1), num(2)]).unwrap_err().code,
        ErrorCode::ADJACENT_OPERANDS
    );
    assert_eq!(
        build_tree(&[close()]).unwrap_err().code,
        ErrorCode::UNPAIRED_BRACKET
    );
    assert_eq!(
        build_tree(&[op(Operator::Rank)]).unwrap_err().code,
        ErrorCode::UNARY_MISSING_OPERAND
    );
}

#[test]
fn test_error_display_includes_code_and_position() {
    let err = parse_err(&[open(), close()]);
    assert_eq!(
        err.to_string(),
        "E107 [malformed expression] empty brackets (at token 0)"
    );
}
