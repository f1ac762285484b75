//! Decoding of one ticker-feed response body into a snapshot.
//!
//! The feed answers with a JSON array of readings. Anything else is rejected:
//! a body that is valid JSON but not an array is reported separately from a
//! body that cannot be decoded at all, since callers treat the former as a
//! soft warning.

use serde_json::Value;
use thiserror::Error;

use crate::models::TickerReading;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot body is not a sequence (got {0})")]
    NotASequence(&'static str),

    #[error("snapshot body could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Parse a feed response body. An empty array is a valid, empty snapshot.
pub fn parse_snapshot(body: &[u8]) -> Result<Vec<TickerReading>, SnapshotError> {
    let value: Value = serde_json::from_slice(body)?;

    if !value.is_array() {
        return Err(SnapshotError::NotASequence(json_kind(&value)));
    }

    Ok(serde_json::from_value(value)?)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
