//! matstep parser: turns a flat token sequence into an operator tree.
//!
//! Two passes: [`validate`] rejects structurally malformed sequences, then
//! [`build_tree`] splits the sequence at the operator evaluated last and
//! recurses on both halves. Recursion depth is bounded by the token count.

mod builder;
mod validator;

pub use builder::{build_tree, find_least_preferential, strip_outer_brackets};
pub use validator::validate;

use matstep_types::{ErrorCode, MatstepError, Node, Result, Token};

/// Validate `tokens` and build their operator tree.
///
/// A lone value comes back as a [`Node::Value`] leaf.
pub fn parse(tokens: &[Token]) -> Result<Node> {
    validate(tokens)?;
    build_tree(tokens)?.ok_or_else(|| {
        MatstepError::new(ErrorCode::EXPRESSION_REQUIRED, "expression required")
    })
}
