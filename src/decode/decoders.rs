//! Decoder implementations

use super::RecordDecoder;
use crate::error::{Error, Result};
use crate::types::Record;
use serde_json::Value;

/// Decoder for bodies that are a top-level JSON array of records
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonArrayDecoder;

impl JsonArrayDecoder {
    /// Create a new JSON array decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonArrayDecoder {
    fn decode(&self, endpoint: &str, body: &str) -> Result<Vec<Record>> {
        let value: Value = serde_json::from_str(body).map_err(|e| {
            Error::malformed_response(endpoint, format!("invalid JSON: {e}"))
        })?;

        match value {
            Value::Array(records) => Ok(records),
            other => Err(Error::malformed_response(
                endpoint,
                format!("expected a JSON array, got {}", json_type_name(&other)),
            )),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
