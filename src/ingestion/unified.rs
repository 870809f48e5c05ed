//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest`], which turns an uploaded byte buffer plus its declared file
//! name and media type into a [`crate::types::ParsedTable`]:
//!
//! `Detect -> Parse -> Normalize -> Done`
//!
//! Any failure short-circuits the whole upload; no partial table is ever returned. If an
//! [`super::observability::IngestionObserver`] is configured through [`IngestionOptions`],
//! success/failure/alerts are reported to it.

use std::fmt;
use std::sync::Arc;

use crate::error::IngestResult;
use crate::types::ParsedTable;

use super::detect::{detect_format, IngestionFormat};
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::{csv, json};

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, detect the format from the declared media type / file name.
    pub format: Option<IngestionFormat>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Ingest an uploaded buffer using default options.
///
/// # Examples
///
/// ```
/// use dataset_ingestion::ingestion::ingest;
/// use dataset_ingestion::types::Value;
///
/// # fn main() -> Result<(), dataset_ingestion::IngestError> {
/// let table = ingest(b"a,b\n1,2\n\n3,4", "numbers.csv", "text/csv")?;
/// assert_eq!(table.columns(), ["a", "b"]);
/// assert_eq!(table.row_count(), 2);
/// assert_eq!(table.get(1, "b"), Some(&Value::Utf8("4".to_string())));
/// # Ok(())
/// # }
/// ```
pub fn ingest(bytes: &[u8], file_name: &str, media_type: &str) -> IngestResult<ParsedTable> {
    ingest_with_options(bytes, file_name, media_type, &IngestionOptions::default())
}

/// Unified ingestion entry point.
///
/// - If `options.format` is `None`, the format is detected from `media_type` (preferred) or the
///   extension of `file_name`.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
pub fn ingest_with_options(
    bytes: &[u8],
    file_name: &str,
    media_type: &str,
    options: &IngestionOptions,
) -> IngestResult<ParsedTable> {
    ingest_resolved(bytes, file_name, media_type, options).map(|(_, table)| table)
}

/// Same as [`ingest_with_options`], also handing back the format the parser ran as.
pub(crate) fn ingest_resolved(
    bytes: &[u8],
    file_name: &str,
    media_type: &str,
    options: &IngestionOptions,
) -> IngestResult<(IngestionFormat, ParsedTable)> {
    let detected = match options.format {
        Some(f) => Ok(f),
        None => detect_format(media_type, file_name),
    };

    let mut ctx = IngestionContext {
        file_name: file_name.to_string(),
        media_type: media_type.to_string(),
        format: None,
        bytes: bytes.len(),
    };

    let result = detected.and_then(|fmt| {
        ctx.format = Some(fmt);
        parse_as(fmt, bytes).map(|table| (fmt, table))
    });

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok((_, table)) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: table.row_count(),
                    columns: table.column_count(),
                },
            ),
            Err(e) => {
                let sev = IngestionSeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

/// Run the parser for an already-detected format.
pub fn parse_as(format: IngestionFormat, bytes: &[u8]) -> IngestResult<ParsedTable> {
    match format {
        IngestionFormat::DelimitedText => csv::ingest_csv_from_bytes(bytes),
        IngestionFormat::Json => json::ingest_json_from_bytes(bytes),
        IngestionFormat::Spreadsheet => ingest_excel_dispatch(bytes),
    }
}

fn ingest_excel_dispatch(bytes: &[u8]) -> IngestResult<ParsedTable> {
    #[cfg(feature = "excel")]
    {
        super::excel::ingest_excel_from_bytes(bytes)
    }

    #[cfg(not(feature = "excel"))]
    {
        let _ = bytes;
        Err(crate::error::IngestError::unsupported(
            "spreadsheet ingestion not enabled (enable cargo feature 'excel')",
        ))
    }
}
