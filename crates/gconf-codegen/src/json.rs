//! JSON document writer and reader.
//!
//! `{"constants": [{"name": "width", "type": "number", "value": 10}, …]}`
//! with array values as lists of `{"type", "value"}` objects.

use gconf_types::{SymbolTable, Value};
use serde::{Deserialize, Serialize};

use crate::error::{EmitError, EmitResult};

#[derive(Debug, Serialize, Deserialize)]
struct Document {
    constants: Vec<ConstantEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConstantEntry {
    name: String,
    #[serde(flatten)]
    value: Value,
}

/// Render the symbol table as pretty-printed JSON, entries in declaration
/// order.
pub fn to_json(symbols: &SymbolTable) -> EmitResult<String> {
    let constants = symbols
        .iter()
        .map(|(name, value)| {
            if !is_finite(value) {
                return Err(EmitError::NonFinite {
                    name: name.to_string(),
                });
            }
            Ok(ConstantEntry {
                name: name.to_string(),
                value: value.clone(),
            })
        })
        .collect::<EmitResult<Vec<_>>>()?;

    let mut json = serde_json::to_string_pretty(&Document { constants })?;
    json.push('\n');
    Ok(json)
}

/// Recover `(name, value)` pairs from a document written by [`to_json`].
pub fn read_json(json: &str) -> EmitResult<Vec<(String, Value)>> {
    let document: Document = serde_json::from_str(json)?;
    Ok(document
        .constants
        .into_iter()
        .map(|entry| (entry.name, entry.value))
        .collect())
}

fn is_finite(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64().is_finite(),
        Value::String(_) => true,
        Value::Array(items) => items.iter().all(is_finite),
    }
}
