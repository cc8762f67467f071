//! Machine-generated operator catalog.
//!
//! Produces two artifacts from the operator table and the evaluator's kernel
//! binding:
//! 1. **Structured catalog** ([`catalog`], [`catalog_json`]) for tooling
//! 2. **Plain-text reference** ([`generate_reference`]) for documentation
//!
//! Both are generated, so they stay in step with the code.

use matstep_types::{Arity, Operator};
use serde::{Deserialize, Serialize};

/// One row of the operator catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub operator: Operator,
    pub name: String,
    pub symbol: String,
    pub arity: Arity,
    pub rank: u8,
    /// The operand kinds the kernel accepts, if one is bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operands: Option<String>,
    /// Whether a kernel is bound to the operator.
    pub supported: bool,
}

/// Every operator, in catalog order.
pub fn catalog() -> Vec<CatalogEntry> {
    Operator::ALL
        .into_iter()
        .map(|operator| {
            let kernel = matstep_eval::kernel_for(operator);
            CatalogEntry {
                operator,
                name: operator.name().to_string(),
                symbol: operator.symbol().to_string(),
                arity: operator.arity(),
                rank: operator.rank(),
                operands: kernel.map(|k| k.expects().to_string()),
                supported: kernel.is_some(),
            }
        })
        .collect()
}

/// The catalog as a JSON array.
pub fn catalog_json() -> String {
    serde_json::to_string(&catalog()).unwrap_or_else(|_| "[]".to_string())
}

/// A plain-text operator reference, one line per operator, loosest first.
pub fn generate_reference() -> String {
    let mut entries = catalog();
    entries.sort_by_key(|e| e.rank);

    let mut out = String::from("matstep operators (rank: higher binds tighter)\n");
    for e in &entries {
        let form = match e.arity {
            Arity::Unary => format!("{} X", e.symbol),
            Arity::Binary => format!("X {} Y", e.symbol),
        };
        let operands = e.operands.as_deref().unwrap_or("not supported yet");
        out.push_str(&format!(
            "  {:<22} {:<12} rank {}  {}\n",
            e.name, form, e.rank, operands
        ));
    }
    out
}
