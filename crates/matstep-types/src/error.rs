use crate::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error kind, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Structural defect in the token sequence. Nothing was evaluated.
    MalformedExpression,
    /// A resolved operand is not of the kind the operator requires.
    InvalidOperandType,
    /// The operator is in the catalog but has no kernel bound to it.
    UnsupportedOperator,
    /// A kernel rejected correctly typed operands.
    KernelFailure,
}

/// Numeric error code (E100–E499).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Malformed expressions (E100–E199) ──
    pub const EXPRESSION_REQUIRED: Self = Self(100);
    pub const CLOSE_WITHOUT_OPEN: Self = Self(101);
    pub const UNBALANCED_BRACKETS: Self = Self(102);
    pub const UNPAIRED_BRACKET: Self = Self(103);
    pub const UNARY_MISSING_OPERAND: Self = Self(104);
    pub const BINARY_MISSING_OPERANDS: Self = Self(105);
    pub const ADJACENT_OPERANDS: Self = Self(106);
    pub const EMPTY_BRACKETS: Self = Self(107);
    pub const UNEXPECTED_LEFT_OPERAND: Self = Self(108);
    pub const EXPRESSION_TOO_LONG: Self = Self(109);
    pub const UNREADABLE_TOKENS: Self = Self(110);

    // ── Operand types (E200–E299) ──
    pub const OPERAND_TYPE_MISMATCH: Self = Self(200);

    // ── Unsupported operators (E300–E399) ──
    pub const UNSUPPORTED_OPERATOR: Self = Self(300);

    // ── Kernel failures (E400–E499) ──
    pub const KERNEL_FAILURE: Self = Self(400);

    /// Get the kind for this error code.
    pub fn kind(self) -> ErrorKind {
        match self.0 {
            100..=199 => ErrorKind::MalformedExpression,
            200..=299 => ErrorKind::InvalidOperandType,
            300..=399 => ErrorKind::UnsupportedOperator,
            400..=499 => ErrorKind::KernelFailure,
            _ => ErrorKind::MalformedExpression, // fallback
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedExpression => write!(f, "malformed expression"),
            Self::InvalidOperandType => write!(f, "invalid operand type"),
            Self::UnsupportedOperator => write!(f, "unsupported operator"),
            Self::KernelFailure => write!(f, "evaluation failed"),
        }
    }
}

/// A structured matstep error.
///
/// Every failure of the pipeline is terminal for the call, so a single
/// error is returned rather than a collection. The caller displays
/// `message` verbatim; it must not parse free-form strings to recover the
/// kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatstepError {
    /// Error code (e.g., E104).
    pub code: ErrorCode,
    /// Error kind (derived from code).
    pub kind: ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Index of the offending token in the input sequence, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    /// The operator being evaluated, for evaluation-time failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
}

impl MatstepError {
    /// Create a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            kind: code.kind(),
            message: message.into(),
            position: None,
            operator: None,
        }
    }

    /// Attach the index of the offending token.
    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Attach the operator being evaluated.
    pub fn for_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// A resolved operand did not match the operator's required kinds.
    pub fn invalid_operand_type(operator: Operator, expected: &str, found: &str) -> Self {
        Self::new(
            ErrorCode::OPERAND_TYPE_MISMATCH,
            format!(
                "{} requires {expected}, found {found}",
                operator.name()
            ),
        )
        .for_operator(operator)
    }

    /// No kernel is bound to the operator.
    pub fn unsupported(operator: Operator) -> Self {
        Self::new(
            ErrorCode::UNSUPPORTED_OPERATOR,
            format!("{} is not supported yet", operator.name()),
        )
        .for_operator(operator)
    }

    /// A kernel rejected its operands; `message` is the kernel's own text.
    pub fn kernel_failure(operator: Operator, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::KERNEL_FAILURE, message).for_operator(operator)
    }
}

impl fmt::Display for MatstepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.code, self.kind, self.message)?;
        if let Some(position) = self.position {
            write!(f, " (at token {position})")?;
        }
        Ok(())
    }
}

impl std::error::Error for MatstepError {}
