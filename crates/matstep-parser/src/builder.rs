//! Tree construction: recursively split a token window at its least
//! preferential operator.
//!
//! The builder works on index ranges of the caller's token slice, so every
//! error it reports carries the absolute position of the offending token.

use crate::validator::{binary_missing_operands, unary_missing_operand};
use log::{debug, trace};
use matstep_types::{ErrorCode, MatstepError, Node, OperationNode, Operator, Result, Token};
use std::ops::Range;

/// Build the operator tree for `tokens`.
///
/// Returns `Ok(None)` for an empty window. Expects a sequence that already
/// passed [`validate`](crate::validate), but reports any structural defect
/// it still finds instead of building an incomplete node.
pub fn build_tree(tokens: &[Token]) -> Result<Option<Node>> {
    TreeBuilder { tokens }.build(0..tokens.len())
}

/// Remove one redundant bracket pair wrapping the whole sequence.
///
/// The pair is removed only when the bracket at position 0 is closed by the
/// bracket at the last position; `(A) + (B)` is left untouched.
pub fn strip_outer_brackets(tokens: &[Token]) -> &[Token] {
    let range = outer_pair_interior(tokens, 0..tokens.len());
    &tokens[range]
}

/// Index of the operator to evaluate last, ignoring bracketed operators.
///
/// Scans left to right and keeps the loosest operator seen so far, with a
/// later operator of equal rank replacing an earlier one. Once a unary
/// operator is the candidate, later unary operators no longer replace it;
/// a later binary operator of equal or looser rank does.
pub fn find_least_preferential(tokens: &[Token]) -> Option<usize> {
    select_root(tokens).map(|(i, _)| i)
}

fn select_root(tokens: &[Token]) -> Option<(usize, Operator)> {
    let mut depth = 0usize;
    let mut best: Option<(usize, Operator)> = None;
    let mut unary_selected = false;

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Bracket(b) if b.is_open() => depth += 1,
            Token::Bracket(_) => depth = depth.saturating_sub(1),
            Token::Operator(op) if depth == 0 => {
                if best.is_some_and(|(_, current)| op.rank() > current.rank()) {
                    continue;
                }
                if op.is_unary() {
                    if !unary_selected {
                        best = Some((i, *op));
                    }
                    unary_selected = true;
                } else {
                    best = Some((i, *op));
                    unary_selected = false;
                }
            }
            _ => {}
        }
    }
    best
}

/// Interior of `range` if its first and last tokens are one matching pair.
fn outer_pair_interior(tokens: &[Token], range: Range<usize>) -> Range<usize> {
    if range.len() < 2
        || !tokens[range.start].is_open_bracket()
        || !tokens[range.end - 1].is_close_bracket()
    {
        return range;
    }
    let mut unclosed = 1usize;
    for token in &tokens[range.start + 1..range.end - 1] {
        match token {
            Token::Bracket(b) if b.is_open() => unclosed += 1,
            Token::Bracket(_) => {
                unclosed -= 1;
                if unclosed == 0 {
                    return range;
                }
            }
            _ => {}
        }
    }
    range.start + 1..range.end - 1
}

/// Interiors of the top-level bracket pairs in `range`.
fn groups(tokens: &[Token], range: Range<usize>) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    let mut open_at = None;
    let mut depth = 0usize;
    for i in range {
        match &tokens[i] {
            Token::Bracket(b) if b.is_open() => {
                if depth == 0 {
                    open_at = Some(i);
                }
                depth += 1;
            }
            Token::Bracket(_) if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(start) = open_at.take() {
                        found.push(start + 1..i);
                    }
                }
            }
            _ => {}
        }
    }
    found
}

struct TreeBuilder<'a> {
    tokens: &'a [Token],
}

impl TreeBuilder<'_> {
    fn build(&self, range: Range<usize>) -> Result<Option<Node>> {
        let inner = outer_pair_interior(self.tokens, range.clone());
        if inner != range {
            trace!("stripped brackets at {} and {}", range.start, range.end - 1);
            return self.build(inner);
        }

        match range.len() {
            0 => return Ok(None),
            1 => return self.leaf(range.start).map(Some),
            _ => {}
        }

        let Some((offset, operator)) = select_root(&self.tokens[range.clone()]) else {
            // A defect inside a group outranks the missing operator around it.
            for group in groups(self.tokens, range.clone()) {
                self.build(group)?;
            }
            return Err(MatstepError::new(
                ErrorCode::ADJACENT_OPERANDS,
                "operands need an operator between them",
            )
            .at(range.start));
        };
        let split = range.start + offset;
        debug!("root of tokens {:?} is {} at {}", range, operator, split);

        let first = self.build(range.start..split)?;
        let second = self.build(split + 1..range.end)?;
        self.operation(operator, split, first, second).map(Some)
    }

    fn leaf(&self, at: usize) -> Result<Node> {
        match &self.tokens[at] {
            Token::Value(value) => Ok(Node::Value(value.clone())),
            Token::Operator(op) if op.is_unary() => Err(unary_missing_operand(at)),
            Token::Operator(_) => Err(binary_missing_operands(at)),
            Token::Bracket(_) => Err(MatstepError::new(
                ErrorCode::UNPAIRED_BRACKET,
                "unpaired bracket",
            )
            .at(at)),
        }
    }

    fn operation(
        &self,
        operator: Operator,
        at: usize,
        first: Option<Node>,
        second: Option<Node>,
    ) -> Result<Node> {
        let node = if operator.is_unary() {
            match (first, second) {
                (None, Some(operand)) => OperationNode::unary(operator, operand),
                (Some(_), _) => {
                    return Err(MatstepError::new(
                        ErrorCode::UNEXPECTED_LEFT_OPERAND,
                        format!("{} takes a single operand on its right", operator.name()),
                    )
                    .at(at)
                    .for_operator(operator))
                }
                (None, None) => return Err(unary_missing_operand(at).for_operator(operator)),
            }
        } else {
            match (first, second) {
                (Some(first), Some(second)) => OperationNode::binary(operator, first, second),
                _ => return Err(binary_missing_operands(at).for_operator(operator)),
            }
        };
        Ok(Node::Operation(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matstep_types::Scalar;

    fn num(n: i64) -> Token {
        Token::scalar(Scalar::integer(n))
    }

    fn op(o: Operator) -> Token {
        o.into()
    }

    #[test]
    fn test_strip_requires_matching_pair() {
        let wrapped = [Token::open(), num(1), Token::close()];
        assert_eq!(strip_outer_brackets(&wrapped), &[num(1)]);

        let two_groups = [
            Token::open(),
            num(1),
            Token::close(),
            op(Operator::ScalarPlus),
            Token::open(),
            num(2),
            Token::close(),
        ];
        assert_eq!(strip_outer_brackets(&two_groups), &two_groups[..]);
    }

    #[test]
    fn test_strip_removes_only_one_layer() {
        let tokens = [Token::open(), Token::open(), num(1), Token::close(), Token::close()];
        assert_eq!(strip_outer_brackets(&tokens), &tokens[1..4]);
    }

    #[test]
    fn test_least_preferential_ignores_bracketed_operators() {
        let tokens = [
            num(4),
            op(Operator::ScalarMultiply),
            Token::open(),
            num(2),
            op(Operator::ScalarPlus),
            num(3),
            Token::close(),
        ];
        assert_eq!(find_least_preferential(&tokens), Some(1));
    }

    #[test]
    fn test_least_preferential_without_operators() {
        assert_eq!(find_least_preferential(&[num(1)]), None);
    }

    #[test]
    fn test_double_wrapped_group_builds() {
        let tokens = [
            Token::open(),
            Token::open(),
            num(1),
            op(Operator::ScalarPlus),
            num(2),
            Token::close(),
            Token::close(),
        ];
        let tree = build_tree(&tokens).unwrap().unwrap();
        assert_eq!(tree.to_string(), "(1 + 2)");
    }

    #[test]
    fn test_groups_lists_top_level_pairs() {
        let tokens = [
            num(1),
            Token::open(),
            Token::open(),
            num(2),
            Token::close(),
            Token::close(),
            Token::open(),
            num(3),
            Token::close(),
        ];
        assert_eq!(groups(&tokens, 0..tokens.len()), vec![2..5, 7..8]);
    }

    #[test]
    fn test_empty_window_is_none() {
        assert_eq!(build_tree(&[]).unwrap(), None);
    }
}
