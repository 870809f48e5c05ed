#![cfg(feature = "excel")]

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::error::{IngestError, IngestResult};
use crate::types::{ParsedTable, RawTable, Row, Value};

use super::normalize::{normalize, HeaderNames};

/// Ingest an in-memory workbook (`.xlsx`, `.xls`, `.xlsb`, `.ods`) into a [`ParsedTable`].
///
/// Behavior:
/// - Uses the first sheet in the workbook by position
/// - Detects the first non-empty row as the header row
/// - The header ends at its last non-blank cell; cells to the right of it are dropped
/// - Reads remaining rows that have a value under the header; empty cells are left out of the
///   row record
pub fn ingest_excel_from_bytes(bytes: &[u8]) -> IngestResult<ParsedTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    if workbook.sheet_names().is_empty() {
        return Err(IngestError::unsupported("workbook has no sheets"));
    }
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::unsupported("workbook has no sheets"))??;

    normalize(ingest_sheet_range(&range))
}

fn ingest_sheet_range(range: &Range<Data>) -> RawTable {
    let mut iter = range
        .rows()
        .skip_while(|row| row.iter().all(|c| matches!(c, Data::Empty)));

    let Some(header_row) = iter.next() else {
        return RawTable::default();
    };
    // The used range can be wider than the header; trailing blank header cells are padding.
    let width = header_row
        .iter()
        .rposition(|c| !is_blank_header(c))
        .map_or(0, |last| last + 1);
    let columns = header_row[..width]
        .iter()
        .map(cell_to_header_string)
        .collect::<Vec<_>>();
    let columns = columns.iter().map(String::as_str).collect::<HeaderNames>().into_vec();

    let mut rows: Vec<Row> = Vec::new();
    for row in iter {
        if row.iter().take(width).all(|c| matches!(c, Data::Empty)) {
            continue;
        }

        let mut out_row = Row::with_capacity(columns.len());
        for (column, cell) in columns.iter().zip(row.iter()) {
            if let Some(v) = convert_cell(cell) {
                out_row.insert(column.clone(), v);
            }
        }
        rows.push(out_row);
    }

    RawTable::new(columns, rows)
}

fn is_blank_header(c: &Data) -> bool {
    match c {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(f) => f.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
        Data::Empty => "".to_string(),
    }
}

/// Convert a cell into a row value. Empty cells yield `None` (absent key).
fn convert_cell(c: &Data) -> Option<Value> {
    let v = match c {
        Data::Empty => return None,
        Data::String(s) => Value::Utf8(s.clone()),
        Data::Bool(b) => Value::Bool(*b),
        Data::Int(i) => Value::Int64(*i),
        Data::Float(f) => float_value(*f),
        Data::DateTime(dt) => Value::Float64(dt.as_f64()),
        Data::DateTimeIso(s) => Value::Utf8(s.clone()),
        Data::DurationIso(s) => Value::Utf8(s.clone()),
        Data::Error(e) => Value::Utf8(e.to_string()),
    };
    Some(v)
}

// Workbooks store every number as a double; whole values read back as integers.
fn float_value(f: f64) -> Value {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Value::Int64(f as i64)
    } else {
        Value::Float64(f)
    }
}
