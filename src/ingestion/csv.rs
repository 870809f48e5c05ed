//! Delimited-text (CSV) ingestion implementation.

use crate::error::{IngestError, IngestResult};
use crate::types::{ParsedTable, RawTable, Row, Value};

use super::normalize::{normalize, HeaderNames};

const UTF8_BOM: &str = "\u{feff}";

/// Ingest comma-separated text into a [`ParsedTable`].
///
/// Rules:
///
/// - Input must be UTF-8 (a leading BOM is ignored).
/// - The first non-blank line is the header; it must have at least one non-blank field.
/// - Blank lines never produce rows.
/// - Values are kept as [`Value::Utf8`]; no numeric coercion happens here.
/// - Short lines leave their missing trailing columns absent; surplus fields are dropped.
pub fn ingest_csv_from_bytes(bytes: &[u8]) -> IngestResult<ParsedTable> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let mut rdr = reader_builder().from_reader(text.as_bytes());
    normalize(ingest_csv_from_reader(&mut rdr)?)
}

/// CSV reader configuration used for uploads: headers on, ragged rows allowed.
pub fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}

/// Ingest CSV data from an existing CSV reader.
///
/// The reader should be built with headers enabled and `flexible(true)` (see [`reader_builder`]);
/// otherwise ragged lines surface as [`IngestError::MalformedInput`].
pub fn ingest_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> IngestResult<RawTable> {
    let headers = rdr.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::malformed("header line is empty"));
    }
    let columns = headers.iter().collect::<HeaderNames>().into_vec();

    let mut rows: Vec<Row> = Vec::new();
    for result in rdr.records() {
        let record = result?;

        let mut row = Row::with_capacity(columns.len());
        for (column, raw) in columns.iter().zip(record.iter()) {
            row.insert(column.clone(), Value::Utf8(raw.to_owned()));
        }
        rows.push(row);
    }

    Ok(RawTable::new(columns, rows))
}
