//! The operator catalog.
//!
//! Every operator kind carries a display name, a symbol, a rank and an
//! arity. The table is an exhaustive `match`, so adding a variant without
//! describing it is a compile error.
//!
//! Rank is binding strength: higher binds tighter.
//!
//! | Rank | Operators                                              |
//! |------|--------------------------------------------------------|
//! | 4    | unary matrix operators (`det`, `rref`, `rank`, ...)     |
//! | 3    | `^`                                                    |
//! | 2    | `*`, `/`                                               |
//! | 1    | `+`, `-`                                               |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of operand slots an operator fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    /// One operand, written to the right of the operator.
    Unary,
    /// Operands on both sides.
    Binary,
}

/// Static description of one operator kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperatorInfo {
    pub name: &'static str,
    pub symbol: &'static str,
    pub rank: u8,
    pub arity: Arity,
}

/// Every operator kind a token sequence may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    ScalarPlus,
    ScalarMinus,
    ScalarMultiply,
    ScalarDivide,
    ScalarPower,
    ScalarMatrixMultiply,
    MatrixPlus,
    MatrixMinus,
    MatrixMultiply,
    MatrixPower,
    Determinant,
    RowReduce,
    Rank,
    NullSpace,
    Transpose,
    Inverse,
    ColumnSpace,
}

const ADDITIVE: u8 = 1;
const MULTIPLICATIVE: u8 = 2;
const POWER: u8 = 3;
const PREFIX: u8 = 4;

const fn binary(name: &'static str, symbol: &'static str, rank: u8) -> OperatorInfo {
    OperatorInfo {
        name,
        symbol,
        rank,
        arity: Arity::Binary,
    }
}

const fn unary(name: &'static str, symbol: &'static str) -> OperatorInfo {
    OperatorInfo {
        name,
        symbol,
        rank: PREFIX,
        arity: Arity::Unary,
    }
}

impl Operator {
    /// All operator kinds, in declaration order.
    pub const ALL: [Operator; 17] = [
        Operator::ScalarPlus,
        Operator::ScalarMinus,
        Operator::ScalarMultiply,
        Operator::ScalarDivide,
        Operator::ScalarPower,
        Operator::ScalarMatrixMultiply,
        Operator::MatrixPlus,
        Operator::MatrixMinus,
        Operator::MatrixMultiply,
        Operator::MatrixPower,
        Operator::Determinant,
        Operator::RowReduce,
        Operator::Rank,
        Operator::NullSpace,
        Operator::Transpose,
        Operator::Inverse,
        Operator::ColumnSpace,
    ];

    /// Catalog entry for this operator.
    pub const fn info(self) -> OperatorInfo {
        match self {
            Operator::ScalarPlus => binary("scalar plus", "+", ADDITIVE),
            Operator::ScalarMinus => binary("scalar minus", "-", ADDITIVE),
            Operator::MatrixPlus => binary("matrix plus", "+", ADDITIVE),
            Operator::MatrixMinus => binary("matrix minus", "-", ADDITIVE),
            Operator::ScalarMultiply => binary("scalar multiply", "*", MULTIPLICATIVE),
            Operator::ScalarDivide => binary("scalar divide", "/", MULTIPLICATIVE),
            Operator::ScalarMatrixMultiply => {
                binary("scalar-matrix multiply", "*", MULTIPLICATIVE)
            }
            Operator::MatrixMultiply => binary("matrix multiply", "*", MULTIPLICATIVE),
            Operator::ScalarPower => binary("scalar power", "^", POWER),
            Operator::MatrixPower => binary("matrix power", "^", POWER),
            Operator::Determinant => unary("determinant", "det"),
            Operator::RowReduce => unary("row reduce", "rref"),
            Operator::Rank => unary("rank", "rank"),
            Operator::NullSpace => unary("null space", "null"),
            Operator::Transpose => unary("transpose", "transpose"),
            Operator::Inverse => unary("inverse", "inv"),
            Operator::ColumnSpace => unary("column space", "col"),
        }
    }

    pub const fn name(self) -> &'static str {
        self.info().name
    }

    pub const fn symbol(self) -> &'static str {
        self.info().symbol
    }

    pub const fn rank(self) -> u8 {
        self.info().rank
    }

    pub const fn arity(self) -> Arity {
        self.info().arity
    }

    pub const fn is_unary(self) -> bool {
        matches!(self.arity(), Arity::Unary)
    }

    pub const fn is_binary(self) -> bool {
        matches!(self.arity(), Arity::Binary)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
