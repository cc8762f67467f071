//! Runtime options for a computation.

use matstep_types::{ErrorCode, MatstepError, Result, Token};
use serde::{Deserialize, Serialize};

/// Options accepted by [`compute_with_options`](crate::compute_with_options).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputeOptions {
    /// Longest token sequence accepted. `None` means unlimited.
    ///
    /// Tree building and evaluation recurse at most once per token, so this
    /// also bounds stack depth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>,
}

impl ComputeOptions {
    /// Options with a token limit.
    pub fn with_max_tokens(max_tokens: usize) -> Self {
        Self {
            max_tokens: Some(max_tokens),
        }
    }

    /// Reject `tokens` if it exceeds the configured limit.
    pub(crate) fn check(&self, tokens: &[Token]) -> Result<()> {
        match self.max_tokens {
            Some(limit) if tokens.len() > limit => Err(MatstepError::new(
                ErrorCode::EXPRESSION_TOO_LONG,
                format!(
                    "expression has {} tokens, more than the limit of {limit}",
                    tokens.len()
                ),
            )
            .at(limit)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matstep_types::Scalar;

    #[test]
    fn test_default_is_unlimited() {
        let tokens = vec![Token::scalar(Scalar::integer(1)); 10_000];
        assert!(ComputeOptions::default().check(&tokens).is_ok());
    }

    #[test]
    fn test_limit_is_inclusive() {
        let tokens = vec![Token::scalar(Scalar::integer(1)); 3];
        assert!(ComputeOptions::with_max_tokens(3).check(&tokens).is_ok());
        let err = ComputeOptions::with_max_tokens(2).check(&tokens).unwrap_err();
        assert_eq!(err.code, ErrorCode::EXPRESSION_TOO_LONG);
        assert_eq!(err.position, Some(2));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let opts: ComputeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, ComputeOptions::default());
        let opts: ComputeOptions = serde_json::from_str(r#"{"max_tokens":64}"#).unwrap();
        assert_eq!(opts.max_tokens, Some(64));
    }
}
