//! Core data model types for ingestion.
//!
//! Every supported upload format is normalized into a [`ParsedTable`]: an ordered list of unique
//! column names plus one [`Row`] record per data row. Cells are typed [`Value`]s.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// A single cell value in a [`Row`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null (e.g. JSON `null`).
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int64(i64),
    /// Unsigned integer above `i64::MAX` (JSON only).
    UInt64(u64),
    /// 64-bit float.
    Float64(f64),
    /// UTF-8 string.
    Utf8(String),
    /// A JSON array or object nested inside a record, carried verbatim.
    Nested(serde_json::Value),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the string payload of a [`Value::Utf8`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Utf8(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value (integers are widened).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int64(i) => Some(*i as f64),
            Self::UInt64(u) => Some(*u as f64),
            Self::Float64(f) => Some(*f),
            _ => None,
        }
    }

    /// Convert into the equivalent JSON value. Non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int64(i) => serde_json::Value::from(*i),
            Self::UInt64(u) => serde_json::Value::from(*u),
            Self::Float64(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::Utf8(s) => serde_json::Value::String(s.clone()),
            Self::Nested(v) => v.clone(),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int64(i) => serializer.serialize_i64(*i),
            Self::UInt64(u) => serializer.serialize_u64(*u),
            Self::Float64(f) if f.is_finite() => serializer.serialize_f64(*f),
            Self::Float64(_) => serializer.serialize_unit(),
            Self::Utf8(s) => serializer.serialize_str(s),
            Self::Nested(v) => v.serialize(serializer),
        }
    }
}

/// One logical data row: column name -> value, in source order.
///
/// A row may lack keys listed in [`ParsedTable::columns`] (read as absent) and, for JSON
/// sources, may carry keys that are not listed there.
pub type Row = IndexMap<String, Value>;

/// Intermediate parser output, before [`crate::ingestion::normalize::normalize`] validates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Derived column names, in first-encountered order.
    pub columns: Vec<String>,
    /// Parsed row records.
    pub rows: Vec<Row>,
}

impl RawTable {
    /// Create a raw table from derived columns and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }
}

/// Normalized, format-independent result of ingesting an upload.
///
/// Construct through [`crate::ingestion::normalize::normalize`], which guarantees:
///
/// - `row_count == rows.len()`
/// - `columns` holds no duplicates
/// - `columns` is non-empty whenever there is at least one row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTable {
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<Row>,
    pub(crate) row_count: usize,
}

impl ParsedTable {
    /// Ordered, unique column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row records in source order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of advertised columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Look up a cell. Keys missing from the row read as `None`.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Serialize the rows as a JSON array, emitting keys in `columns` order.
    ///
    /// Only keys listed in `columns` are written; keys a row does not carry are skipped, and
    /// extra per-row keys that were never advertised are dropped.
    pub fn rows_as_json(&self) -> serde_json::Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut obj = serde_json::Map::with_capacity(self.columns.len());
                for column in &self.columns {
                    if let Some(v) = row.get(column) {
                        obj.insert(column.clone(), v.to_json());
                    }
                }
                serde_json::Value::Object(obj)
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}
