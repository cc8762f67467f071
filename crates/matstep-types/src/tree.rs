//! The operator tree produced by the tree builder.
//!
//! Nodes are built bottom-up: children first, then the parent that owns
//! them. Nothing is mutated after construction.

use crate::{Arity, Operator, Value};
use std::fmt;

/// A node of the operator tree: a leaf value or a pending operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Value(Value),
    Operation(OperationNode),
}

/// An operator together with the operands it owns.
///
/// Unary operators fill only `second_arg`; binary operators fill both.
/// The constructors enforce this, so a computable node never has an
/// empty required slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationNode {
    operator: Operator,
    first_arg: Option<Box<Node>>,
    second_arg: Box<Node>,
}

impl OperationNode {
    /// A unary operation. `operator` must be unary.
    pub fn unary(operator: Operator, operand: Node) -> Self {
        debug_assert_eq!(operator.arity(), Arity::Unary, "{operator} is not unary");
        Self {
            operator,
            first_arg: None,
            second_arg: Box::new(operand),
        }
    }

    /// A binary operation. `operator` must be binary.
    pub fn binary(operator: Operator, first: Node, second: Node) -> Self {
        debug_assert_eq!(operator.arity(), Arity::Binary, "{operator} is not binary");
        Self {
            operator,
            first_arg: Some(Box::new(first)),
            second_arg: Box::new(second),
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Left operand; `None` for unary operators.
    pub fn first_arg(&self) -> Option<&Node> {
        self.first_arg.as_deref()
    }

    /// Right operand (the only operand of a unary operator).
    pub fn second_arg(&self) -> &Node {
        &self.second_arg
    }
}

impl Node {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Node::Value(v) => Some(v),
            Node::Operation(_) => None,
        }
    }

    pub fn as_operation(&self) -> Option<&OperationNode> {
        match self {
            Node::Operation(op) => Some(op),
            Node::Value(_) => None,
        }
    }

    /// Number of operation nodes in this tree.
    pub fn operation_count(&self) -> usize {
        match self {
            Node::Value(_) => 0,
            Node::Operation(op) => {
                1 + op.first_arg().map_or(0, Node::operation_count)
                    + op.second_arg().operation_count()
            }
        }
    }

    /// Height of the tree; a lone value has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Node::Value(_) => 0,
            Node::Operation(op) => {
                1 + op
                    .first_arg()
                    .map_or(0, Node::depth)
                    .max(op.second_arg().depth())
            }
        }
    }
}

impl From<Value> for Node {
    fn from(v: Value) -> Self {
        Node::Value(v)
    }
}

impl From<OperationNode> for Node {
    fn from(op: OperationNode) -> Self {
        Node::Operation(op)
    }
}

/// Fully parenthesized infix: `((4 + 2) + 3)`, `det([[1, 2], [3, 4]])`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Value(v) => write!(f, "{v}"),
            Node::Operation(op) => write!(f, "{op}"),
        }
    }
}

impl fmt::Display for OperationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first_arg() {
            Some(first) => write!(
                f,
                "({first} {} {})",
                self.operator.symbol(),
                self.second_arg
            ),
            None => write!(f, "{}({})", self.operator.symbol(), self.second_arg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Matrix, Scalar};

    fn int(n: i64) -> Node {
        Node::Value(Value::Scalar(Scalar::integer(n)))
    }

    #[test]
    fn test_binary_display_and_counts() {
        let inner = OperationNode::binary(Operator::ScalarPlus, int(4), int(2));
        let root = Node::from(OperationNode::binary(
            Operator::ScalarPlus,
            inner.into(),
            int(3),
        ));
        assert_eq!(root.to_string(), "((4 + 2) + 3)");
        assert_eq!(root.operation_count(), 2);
        assert_eq!(root.depth(), 2);
    }

    #[test]
    fn test_unary_fills_only_second_slot() {
        let m = Node::Value(Value::Matrix(Matrix::identity(2).unwrap()));
        let det = OperationNode::unary(Operator::Determinant, m.clone());
        assert!(det.first_arg().is_none());
        assert_eq!(det.second_arg(), &m);
        assert_eq!(Node::from(det).to_string(), "det([[1, 0], [0, 1]])");
    }

    #[test]
    fn test_leaf_has_no_operations() {
        let leaf = int(7);
        assert_eq!(leaf.operation_count(), 0);
        assert_eq!(leaf.depth(), 0);
        assert!(leaf.as_operation().is_none());
        assert!(leaf.as_value().is_some());
    }
}
