//! Post-order evaluation of the operator tree.

use crate::dispatch::kernel_for;
use log::debug;
use matstep_types::{MatstepError, Node, OperationNode, ResultNode, Result, Value};

/// Walks an operator tree and builds the parallel result tree.
///
/// One evaluator serves one call; nothing is carried over between trees.
#[derive(Debug, Default)]
pub struct Evaluator {
    /// Operations performed so far.
    operations: usize,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operations evaluated by this evaluator.
    pub fn operations(&self) -> usize {
        self.operations
    }

    /// Evaluate `node`.
    ///
    /// A leaf value needs no computation and yields `Ok(None)`; the caller
    /// uses the leaf itself as the resolved value.
    pub fn evaluate(&mut self, node: &Node) -> Result<Option<ResultNode>> {
        match node {
            Node::Value(_) => Ok(None),
            Node::Operation(op) => self.evaluate_operation(op).map(Some),
        }
    }

    /// Evaluate one operand slot and resolve it to a value: the answer of
    /// its evaluation, or the leaf itself when nothing was computed.
    fn operand(&mut self, node: &Node) -> Result<(Option<ResultNode>, Value)> {
        match node {
            Node::Value(value) => Ok((None, value.clone())),
            Node::Operation(op) => {
                let result = self.evaluate_operation(op)?;
                let value = result.answer().clone();
                Ok((Some(result), value))
            }
        }
    }

    fn evaluate_operation(&mut self, node: &OperationNode) -> Result<ResultNode> {
        let operator = node.operator();
        let kernel = kernel_for(operator).ok_or_else(|| MatstepError::unsupported(operator))?;

        let first = node.first_arg().map(|arg| self.operand(arg)).transpose()?;
        let (second, second_value) = self.operand(node.second_arg())?;

        let first_value = first.as_ref().map(|(_, value)| value);
        let solution = kernel.apply(operator, first_value, &second_value)?;
        self.operations += 1;
        debug!(
            "{} #{}: [{}] -> {}",
            operator,
            self.operations,
            solution
                .inputs()
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            solution.answer()
        );

        Ok(ResultNode::new(
            solution,
            first.and_then(|(result, _)| result),
            second,
        ))
    }
}

/// Evaluate `node` with a fresh [`Evaluator`].
pub fn evaluate(node: &Node) -> Result<Option<ResultNode>> {
    Evaluator::new().evaluate(node)
}
