//! Format detection from upload metadata.
//!
//! Detection only looks at the declared media type and file name, never at the bytes. A
//! mislabeled file is accepted here and fails later in its parser with
//! [`IngestError::MalformedInput`].

use std::path::Path;

use crate::error::{IngestError, IngestResult};

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngestionFormat {
    /// Comma-separated values with a header line.
    DelimitedText,
    /// JSON array-of-objects or a single object.
    Json,
    /// Spreadsheet/workbook formats (parsing is feature-gated behind `excel`).
    Spreadsheet,
}

impl IngestionFormat {
    /// Match a declared media type. Parameters (`; charset=...`) and case are ignored.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "text/csv" | "application/csv" | "text/comma-separated-values" | "text/x-csv" => {
                Some(Self::DelimitedText)
            }
            "application/json" => Some(Self::Json),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            | "application/vnd.ms-excel" => Some(Self::Spreadsheet),
            _ => None,
        }
    }

    /// Parse a format from a file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::DelimitedText),
            "json" => Some(Self::Json),
            "xlsx" | "xls" => Some(Self::Spreadsheet),
            _ => None,
        }
    }

    /// Parse a format from the extension of a declared file name.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        Path::new(file_name)
            .extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
    }

    /// Short label stored alongside a dataset (`csv`, `json`, `xlsx`).
    pub fn file_type_label(self) -> &'static str {
        match self {
            Self::DelimitedText => "csv",
            Self::Json => "json",
            Self::Spreadsheet => "xlsx",
        }
    }
}

/// Classify an upload by its declared media type, falling back to the file name extension.
///
/// A media type match always wins over the extension.
pub fn detect_format(media_type: &str, file_name: &str) -> IngestResult<IngestionFormat> {
    IngestionFormat::from_media_type(media_type)
        .or_else(|| IngestionFormat::from_file_name(file_name))
        .ok_or_else(|| {
            IngestError::unsupported(format!(
                "cannot infer format from media type '{media_type}' or file name '{file_name}'"
            ))
        })
}
