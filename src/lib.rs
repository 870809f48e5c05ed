//! `dataset-ingestion` turns an uploaded file into a uniform in-memory table, regardless of the
//! source format.
//!
//! The primary entrypoint is [`ingestion::ingest`], which detects the format from the declared
//! media type (falling back to the file extension), parses the bytes, and normalizes the result
//! into a [`types::ParsedTable`].
//!
//! ## What you can ingest
//!
//! **Formats (detected by media type, then by extension):**
//!
//! - **Delimited text**: `text/csv` (and synonyms), `.csv`
//! - **JSON**: `application/json`, `.json` (array of objects, or a single object)
//! - **Spreadsheets** (Cargo feature `excel`, on by default): the xlsx and `vnd.ms-excel` media
//!   types, `.xlsx`, `.xls`
//!
//! **Result shape:**
//!
//! A [`types::ParsedTable`] holds ordered, unique column names, one [`types::Row`] record per
//! data row, and the row count. Cells are typed [`types::Value`]s:
//!
//! - CSV values are always [`types::Value::Utf8`] (no coercion)
//! - JSON and spreadsheet cells keep their type (bool / integer / float / string / null); nested
//!   JSON arrays and objects are kept verbatim as [`types::Value::Nested`]
//!
//! Columns are derived from the header line (CSV), the header row of the first sheet
//! (spreadsheets), or the keys of the first object (JSON). A row may lack some of those columns;
//! JSON rows may also carry keys that the first object did not have.
//!
//! ## Quick example
//!
//! ```rust
//! use dataset_ingestion::ingestion::ingest;
//! use dataset_ingestion::types::Value;
//!
//! # fn main() -> Result<(), dataset_ingestion::IngestError> {
//! let table = ingest(br#"[{"id":1,"name":"Ada"}]"#, "people.json", "application/json")?;
//! assert_eq!(table.columns(), ["id", "name"]);
//! assert_eq!(table.get(0, "id"), Some(&Value::Int64(1)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Storing uploads
//!
//! ```rust
//! use dataset_ingestion::ingestion::IngestionOptions;
//! use dataset_ingestion::storage::{DatasetStore, MemoryDatasetStore};
//! use dataset_ingestion::upload::{upload_dataset, RawUpload, UploadLimits, UploadMetadata};
//!
//! let store = MemoryDatasetStore::new();
//! let upload = RawUpload::new(b"a,b\n1,2\n".to_vec(), "data.csv", "text/csv");
//! let ds = upload_dataset(
//!     &store,
//!     upload,
//!     UploadMetadata::default(),
//!     &UploadLimits::default(),
//!     &IngestionOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(ds.id, 1);
//! assert_eq!(ds.file_type, "csv");
//! assert_eq!(store.get_dataset(1).unwrap().table.row_count(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: format detection, parsers, normalization, observers
//! - [`types`]: table, row, and value types
//! - [`storage`]: dataset repository interface + in-memory store
//! - [`upload`]: size admission and the ingest-then-store flow
//! - [`error`]: error types used across ingestion

pub mod error;
pub mod ingestion;
pub mod storage;
pub mod types;
pub mod upload;

pub use error::{IngestError, IngestResult};
