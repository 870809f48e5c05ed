//! JSON ingestion implementation.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single JSON object, treated as a one-row table: `{"a":1}`
//!
//! Columns come from the keys of the first object only. Later objects keep every key they carry,
//! including keys the first object did not have; those keys are not added to `columns`.

use crate::error::{IngestError, IngestResult};
use crate::types::{ParsedTable, RawTable, Row, Value};

use super::normalize::normalize;

/// Ingest JSON bytes into a [`ParsedTable`].
pub fn ingest_json_from_bytes(bytes: &[u8]) -> IngestResult<ParsedTable> {
    let text = std::str::from_utf8(bytes)?;
    ingest_json_from_str(text)
}

/// Ingest JSON from an in-memory string into a [`ParsedTable`].
pub fn ingest_json_from_str(input: &str) -> IngestResult<ParsedTable> {
    let root = serde_json::from_str::<serde_json::Value>(input)?;
    normalize(raw_table_from_json(root)?)
}

fn raw_table_from_json(root: serde_json::Value) -> IngestResult<RawTable> {
    match root {
        serde_json::Value::Array(items) => ingest_json_values(items),
        serde_json::Value::Object(obj) => {
            let columns: Vec<String> = obj.keys().cloned().collect();
            Ok(RawTable::new(columns, vec![convert_object(obj)]))
        }
        other => Err(IngestError::malformed(format!(
            "json root must be an object or an array of objects (got {})",
            json_kind(&other)
        ))),
    }
}

fn ingest_json_values(items: Vec<serde_json::Value>) -> IngestResult<RawTable> {
    let mut columns: Vec<String> = Vec::new();
    let mut rows: Vec<Row> = Vec::with_capacity(items.len());

    for (idx0, v) in items.into_iter().enumerate() {
        let row_num = idx0 + 1;
        let obj = match v {
            serde_json::Value::Object(obj) => obj,
            other => {
                return Err(IngestError::malformed(format!(
                    "array element {row_num} is not a json object (got {})",
                    json_kind(&other)
                )));
            }
        };

        if idx0 == 0 {
            columns = obj.keys().cloned().collect();
        }
        rows.push(convert_object(obj));
    }

    Ok(RawTable::new(columns, rows))
}

fn convert_object(obj: serde_json::Map<String, serde_json::Value>) -> Row {
    let mut row = Row::with_capacity(obj.len());
    for (k, v) in obj {
        row.insert(k, convert_json_value(v));
    }
    row
}

/// Fold a JSON value into a [`Value`].
///
/// Integers keep their exact value; nested arrays/objects are carried as [`Value::Nested`].
pub fn convert_json_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int64(i)
            } else if let Some(u) = n.as_u64() {
                Value::UInt64(u)
            } else {
                n.as_f64().map(Value::Float64).unwrap_or(Value::Null)
            }
        }
        serde_json::Value::String(s) => Value::Utf8(s),
        nested @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => Value::Nested(nested),
    }
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
