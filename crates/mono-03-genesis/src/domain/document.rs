//! Genesis document probing.
//!
//! Only the top-level `chain_id` is interpreted. The document is never
//! re-serialized, so every other field reaches disk byte-for-byte.

use serde_json::Value;

use crate::domain::errors::GenesisError;

/// Parse `bytes` as a genesis document and return its chain-id.
pub fn validate(bytes: &[u8]) -> Result<String, GenesisError> {
    let doc: Value = serde_json::from_slice(bytes)
        .map_err(|e| GenesisError::Schema(format!("not valid JSON: {e}")))?;

    let obj = doc
        .as_object()
        .ok_or_else(|| GenesisError::Schema("top level is not an object".to_string()))?;

    match obj.get("chain_id") {
        Some(Value::String(id)) if id.trim().is_empty() => {
            Err(GenesisError::Schema("chain_id is empty".to_string()))
        }
        // The node compares chain-ids byte-for-byte.
        Some(Value::String(id)) if id.trim() != id => Err(GenesisError::Schema(format!(
            "chain_id {id:?} has leading or trailing whitespace"
        ))),
        Some(Value::String(id)) => Ok(id.clone()),
        Some(_) => Err(GenesisError::Schema("chain_id is not a string".to_string())),
        None => Err(GenesisError::Schema("chain_id is missing".to_string())),
    }
}

/// [`validate`], then require the chain-id to equal `expected`.
pub fn validate_chain_id(bytes: &[u8], expected: &str) -> Result<String, GenesisError> {
    let actual = validate(bytes)?;
    if actual != expected {
        return Err(GenesisError::ChainIdMismatch {
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(actual)
}
