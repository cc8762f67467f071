//! Evaluation results: steps, solutions and the result tree.

use crate::{Operator, Value};
use serde::{Deserialize, Serialize};

/// One intermediate display snapshot produced by a kernel.
///
/// A step is for showing, not for further computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub value: Value,
    /// Plain-text note, e.g. `R2 = R2 - 3R1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Step {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            description: None,
        }
    }

    pub fn described(value: impl Into<Value>, description: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: Some(description.into()),
        }
    }
}

/// The recorded outcome of evaluating one operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    operator: Operator,
    inputs: Vec<Value>,
    answer: Value,
    steps: Vec<Step>,
}

impl Solution {
    /// Record a solution.
    ///
    /// The answer is always appended as the final step, so every solution
    /// has at least one step to show.
    pub fn new(operator: Operator, inputs: Vec<Value>, answer: Value, mut steps: Vec<Step>) -> Self {
        steps.push(Step::new(answer.clone()));
        Self {
            operator,
            inputs,
            answer,
            steps,
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Resolved operands, in source order.
    pub fn inputs(&self) -> &[Value] {
        &self.inputs
    }

    pub fn answer(&self) -> &Value {
        &self.answer
    }

    /// Steps in evaluation order; the last one restates the answer.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Evaluated counterpart of an operation node.
///
/// A child is `None` exactly when that operand was a leaf value that
/// needed no computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultNode {
    solution: Solution,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    first: Option<Box<ResultNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    second: Option<Box<ResultNode>>,
}

impl ResultNode {
    pub fn new(solution: Solution, first: Option<ResultNode>, second: Option<ResultNode>) -> Self {
        Self {
            solution,
            first: first.map(Box::new),
            second: second.map(Box::new),
        }
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// The answer of this node's operation.
    pub fn answer(&self) -> &Value {
        self.solution.answer()
    }

    pub fn first(&self) -> Option<&ResultNode> {
        self.first.as_deref()
    }

    pub fn second(&self) -> Option<&ResultNode> {
        self.second.as_deref()
    }

    /// Flattened explanation: left subtree steps, right subtree steps,
    /// then this node's own steps.
    pub fn trace(&self) -> Vec<&Step> {
        let mut steps = Vec::new();
        self.collect_steps(&mut steps);
        steps
    }

    fn collect_steps<'a>(&'a self, out: &mut Vec<&'a Step>) {
        if let Some(first) = self.first() {
            first.collect_steps(out);
        }
        if let Some(second) = self.second() {
            second.collect_steps(out);
        }
        out.extend(self.solution.steps());
    }

    /// Solutions in the order they were computed.
    pub fn solutions(&self) -> Vec<&Solution> {
        let mut solutions = Vec::new();
        self.collect_solutions(&mut solutions);
        solutions
    }

    fn collect_solutions<'a>(&'a self, out: &mut Vec<&'a Solution>) {
        if let Some(first) = self.first() {
            first.collect_solutions(out);
        }
        if let Some(second) = self.second() {
            second.collect_solutions(out);
        }
        out.push(&self.solution);
    }

    /// Number of operations performed in this subtree.
    pub fn operation_count(&self) -> usize {
        1 + self.first().map_or(0, ResultNode::operation_count)
            + self.second().map_or(0, ResultNode::operation_count)
    }
}
