//! Input tokens.
//!
//! A computation arrives as a flat, left-to-right sequence of [`Token`]s
//! collected by the caller. Nothing here checks where tokens came from,
//! only what they are.

use crate::{Matrix, Operator, Scalar, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opening or closing bracket. Brackets are not operators: they have
/// neither rank nor arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bracket {
    Open,
    Close,
}

impl Bracket {
    pub fn is_open(self) -> bool {
        self == Bracket::Open
    }
}

/// One element of the input sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Token {
    Value(Value),
    Operator(Operator),
    Bracket(Bracket),
}

impl Token {
    /// A scalar value token.
    pub fn scalar(scalar: Scalar) -> Self {
        Token::Value(Value::Scalar(scalar))
    }

    /// A matrix value token.
    pub fn matrix(matrix: Matrix) -> Self {
        Token::Value(Value::Matrix(matrix))
    }

    pub fn open() -> Self {
        Token::Bracket(Bracket::Open)
    }

    pub fn close() -> Self {
        Token::Bracket(Bracket::Close)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Token::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_operator(&self) -> Option<Operator> {
        match self {
            Token::Operator(op) => Some(*op),
            _ => None,
        }
    }

    pub fn as_bracket(&self) -> Option<Bracket> {
        match self {
            Token::Bracket(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Token::Value(_))
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Operator(_))
    }

    pub fn is_unary_operator(&self) -> bool {
        matches!(self, Token::Operator(op) if op.is_unary())
    }

    pub fn is_binary_operator(&self) -> bool {
        matches!(self, Token::Operator(op) if op.is_binary())
    }

    pub fn is_open_bracket(&self) -> bool {
        matches!(self, Token::Bracket(Bracket::Open))
    }

    pub fn is_close_bracket(&self) -> bool {
        matches!(self, Token::Bracket(Bracket::Close))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Value(v) => write!(f, "{v}"),
            Token::Operator(op) => f.write_str(op.symbol()),
            Token::Bracket(Bracket::Open) => f.write_str("("),
            Token::Bracket(Bracket::Close) => f.write_str(")"),
        }
    }
}

impl From<Value> for Token {
    fn from(v: Value) -> Self {
        Token::Value(v)
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Self {
        Token::Operator(op)
    }
}
