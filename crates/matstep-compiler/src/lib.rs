//! matstep pipeline: orchestrates validation, tree building and evaluation.
//!
//! ```text
//! Tokens → Validator → Tree Builder → Evaluator → Result tree
//! ```
//!
//! Every call starts from scratch: no state is kept between calls.

pub mod catalog;
mod options;

pub use catalog::{catalog, CatalogEntry};
pub use options::ComputeOptions;

use log::debug;
use matstep_types::{ErrorCode, MatstepError, Node, ResultNode, Result, Step, Token, Value};
use serde::{Deserialize, Serialize};

/// Compute `tokens` with default options.
///
/// Returns `Ok(None)` when the sequence is a single value and there is
/// nothing to compute.
pub fn compute(tokens: &[Token]) -> Result<Option<ResultNode>> {
    compute_with_options(tokens, &ComputeOptions::default())
}

/// Compute `tokens` under `options`.
pub fn compute_with_options(
    tokens: &[Token],
    options: &ComputeOptions,
) -> Result<Option<ResultNode>> {
    let tree = parse_with_options(tokens, options)?;
    matstep_eval::evaluate(&tree)
}

fn parse_with_options(tokens: &[Token], options: &ComputeOptions) -> Result<Node> {
    debug!("computing {} tokens", tokens.len());
    options.check(tokens)?;
    matstep_parser::parse(tokens)
}

/// JSON-ready outcome of a computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeResult {
    /// Whether the computation succeeded.
    pub success: bool,
    /// Final answer; for a lone value, the value itself.
    pub answer: Option<Value>,
    /// Result tree, when at least one operation was performed.
    pub tree: Option<ResultNode>,
    /// Flattened steps: left subtree, right subtree, then each node's own.
    pub trace: Vec<Step>,
    /// The error, when `success` is false.
    pub error: Option<MatstepError>,
}

impl ComputeResult {
    /// A failed result carrying `error`.
    pub fn failure(error: MatstepError) -> Self {
        Self {
            success: false,
            answer: None,
            tree: None,
            trace: Vec::new(),
            error: Some(error),
        }
    }
}

/// A computation request as received over a serialized boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeRequest {
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub options: ComputeOptions,
}

/// Compute `tokens` and package the outcome for serialization.
pub fn compute_to_result(tokens: &[Token], options: &ComputeOptions) -> ComputeResult {
    let tree = match parse_with_options(tokens, options) {
        Ok(tree) => tree,
        Err(error) => return ComputeResult::failure(error),
    };
    match matstep_eval::evaluate(&tree) {
        Ok(Some(result)) => ComputeResult {
            success: true,
            answer: Some(result.answer().clone()),
            trace: result.trace().into_iter().cloned().collect(),
            tree: Some(result),
            error: None,
        },
        Ok(None) => ComputeResult {
            success: true,
            answer: tree.as_value().cloned(),
            tree: None,
            trace: Vec::new(),
            error: None,
        },
        Err(error) => ComputeResult::failure(error),
    }
}

/// Compute a deserialized request.
pub fn compute_request(request: &ComputeRequest) -> ComputeResult {
    compute_to_result(&request.tokens, &request.options)
}

/// Decode a JSON token array and compute it.
///
/// Input that does not decode yields a failed result with E110.
pub fn compute_json(tokens_json: &str, options: &ComputeOptions) -> ComputeResult {
    match serde_json::from_str::<Vec<Token>>(tokens_json) {
        Ok(tokens) => compute_to_result(&tokens, options),
        Err(e) => ComputeResult::failure(MatstepError::new(
            ErrorCode::UNREADABLE_TOKENS,
            format!("could not read tokens: {e}"),
        )),
    }
}
