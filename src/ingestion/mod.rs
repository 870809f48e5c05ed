//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest`] (from [`unified`]) which:
//!
//! - detects the format from the declared media type, falling back to the file extension
//!   (or you can force a format via [`IngestionOptions`])
//! - parses the buffer and normalizes it into a [`crate::types::ParsedTable`]
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`json`]
//! - `excel` (feature `excel`)

pub mod csv;
pub mod detect;
#[cfg(feature = "excel")]
pub mod excel;
pub mod json;
pub mod normalize;
pub mod observability;
pub mod unified;

pub use detect::{detect_format, IngestionFormat};
pub use normalize::normalize;
pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    StdErrObserver,
};
pub use unified::{ingest, ingest_with_options, parse_as, IngestionOptions};
