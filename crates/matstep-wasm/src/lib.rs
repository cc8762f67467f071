//! matstep as a WASM module for browser environments.
//!
//! This crate exposes the computation pipeline via `wasm-bindgen`. The UI
//! collects tokens from the user and hands them over as JSON or as plain
//! JS objects.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { compute } from 'matstep-wasm';
//!
//! await init();
//!
//! const result = compute(JSON.stringify([
//!   { value: { scalar: { value: "4" } } },
//!   { operator: "scalar_plus" },
//!   { value: { scalar: { value: "2" } } },
//! ]));
//! console.log(JSON.parse(result).answer);
//! // { scalar: { value: "6", display: "fraction" } }
//! ```

use matstep_compiler::{ComputeOptions, ComputeRequest, ComputeResult};
use matstep_types::{ErrorCode, MatstepError};
use wasm_bindgen::prelude::*;

/// Compute a JSON token array.
///
/// Returns a JSON string containing a `ComputeResult`:
/// ```json
/// { "success": true, "answer": { ... }, "tree": { ... }, "trace": [ ... ], "error": null }
/// ```
///
/// On failure, `success` is `false` and `error` holds the structured error.
/// Undecodable input is reported the same way.
#[wasm_bindgen]
pub fn compute(tokens_json: &str) -> String {
    to_json(&matstep_compiler::compute_json(
        tokens_json,
        &ComputeOptions::default(),
    ))
}

/// Compute a JSON token array under JSON-encoded `ComputeOptions`.
#[wasm_bindgen]
pub fn compute_with_options(tokens_json: &str, options_json: &str) -> String {
    let result = match serde_json::from_str::<ComputeOptions>(options_json) {
        Ok(options) => matstep_compiler::compute_json(tokens_json, &options),
        Err(e) => ComputeResult::failure(MatstepError::new(
            ErrorCode::UNREADABLE_TOKENS,
            format!("could not read options: {e}"),
        )),
    };
    to_json(&result)
}

/// Compute a `{ tokens, options }` request passed as a JS object.
///
/// Resolves to the `ComputeResult` object; rejects only when the request
/// or the result cannot cross the JS boundary.
#[wasm_bindgen]
pub fn compute_value(request: JsValue) -> Result<JsValue, JsValue> {
    let request: ComputeRequest = serde_wasm_bindgen::from_value(request)?;
    let result = matstep_compiler::compute_request(&request);
    Ok(serde_wasm_bindgen::to_value(&result)?)
}

/// Return the operator catalog as a JSON array.
///
/// Each entry lists the operator's name, symbol, arity, rank, accepted
/// operand kinds and whether it is supported.
#[wasm_bindgen]
pub fn operator_catalog() -> String {
    matstep_compiler::catalog::catalog_json()
}

/// Return a plain-text operator reference.
#[wasm_bindgen]
pub fn operator_reference() -> String {
    matstep_compiler::catalog::generate_reference()
}

/// Return the library version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_json(result: &ComputeResult) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"answer":null,"tree":null,"trace":[],"error":{{"code":110,"kind":"malformed_expression","message":"serialization error: {}"}}}}"#,
            e.to_string().replace('"', "'")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(target_arch = "wasm32")]
    use matstep_types::{Operator, Scalar, Token};

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    #[test]
    fn compute_returns_result_json() {
        let out = compute(
            r#"[{"value":{"scalar":{"value":"4"}}},{"operator":"scalar_plus"},{"value":{"scalar":{"value":"2"}}}]"#,
        );
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["success"], true);
        assert_eq!(parsed["answer"]["scalar"]["value"], "6");
        assert_eq!(parsed["trace"].as_array().unwrap().len(), 2);
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    #[test]
    fn compute_reports_bad_json_without_panicking() {
        let parsed: serde_json::Value = serde_json::from_str(&compute("{")).unwrap();
        assert_eq!(parsed["success"], false);
        assert_eq!(parsed["error"]["code"], 110);
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    #[test]
    fn compute_with_options_applies_limit() {
        let out = compute_with_options(
            r#"[{"value":{"scalar":{"value":"1"}}},{"operator":"scalar_plus"},{"value":{"scalar":{"value":"2"}}}]"#,
            r#"{"max_tokens":2}"#,
        );
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["error"]["code"], 109);
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    #[test]
    fn catalog_and_version() {
        let parsed: serde_json::Value = serde_json::from_str(&operator_catalog()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 17);
        assert!(operator_reference().contains("row reduce"));
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }

    // JS values only exist inside a wasm host.
    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen_test::wasm_bindgen_test]
    fn compute_value_round_trips_a_request() {
        let request = ComputeRequest {
            tokens: vec![
                Token::scalar(Scalar::integer(4)),
                Operator::ScalarPlus.into(),
                Token::scalar(Scalar::integer(2)),
            ],
            options: ComputeOptions::default(),
        };
        let value = serde_wasm_bindgen::to_value(&request).unwrap();
        let out = compute_value(value).unwrap();
        let result: ComputeResult = serde_wasm_bindgen::from_value(out).unwrap();
        assert!(result.success);
        assert_eq!(result.answer.unwrap().to_string(), "6");
    }
}
