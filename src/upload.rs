//! Upload flow: admission check, ingestion, and hand-off to a [`DatasetStore`].
//!
//! This is the piece an HTTP upload handler calls once it has decoded the multipart body into a
//! single file part.

use thiserror::Error;

use crate::error::IngestError;
use crate::ingestion::unified::{ingest_resolved, IngestionOptions};
use crate::storage::{Dataset, DatasetStore, NewDataset};

/// Default upload size limit: 50 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Uploader id used when the request does not name one.
pub const DEFAULT_UPLOADER_ID: u64 = 1;

/// A single uploaded file, as received from the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUpload {
    /// File content.
    pub bytes: Vec<u8>,
    /// Client-supplied file name.
    pub file_name: String,
    /// Client-supplied media type. Untrusted; only used as a detection hint.
    pub media_type: String,
    /// Client-supplied size in bytes.
    pub declared_size: u64,
}

impl RawUpload {
    /// Build an upload whose declared size is the buffer length.
    pub fn new(bytes: impl Into<Vec<u8>>, file_name: impl Into<String>, media_type: impl Into<String>) -> Self {
        let bytes = bytes.into();
        Self {
            declared_size: bytes.len() as u64,
            bytes,
            file_name: file_name.into(),
            media_type: media_type.into(),
        }
    }
}

/// Display metadata supplied alongside an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMetadata {
    /// Dataset name; defaults to the upload's file name.
    pub name: Option<String>,
    /// Dataset description; defaults to empty.
    pub description: Option<String>,
    /// Uploading user id.
    pub uploaded_by: u64,
}

impl Default for UploadMetadata {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            uploaded_by: DEFAULT_UPLOADER_ID,
        }
    }
}

/// Admission limits applied before any parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    /// Maximum accepted upload size in bytes.
    pub max_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Error type returned by [`upload_dataset`].
#[derive(Debug, Error)]
pub enum UploadError {
    /// Upload exceeds [`UploadLimits::max_bytes`].
    #[error("upload too large: {size} bytes exceeds limit of {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    /// Upload carries no bytes.
    #[error("no file content uploaded")]
    EmptyUpload,

    /// Ingestion of the upload failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

impl UploadError {
    /// HTTP status an upload handler should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::TooLarge { .. } => 413,
            Self::EmptyUpload => 400,
            Self::Ingest(e) => e.status_code(),
        }
    }
}

/// Reject uploads that are empty or above the size limit.
///
/// Both the declared size and the actual buffer length are checked.
pub fn admit(upload: &RawUpload, limits: &UploadLimits) -> Result<(), UploadError> {
    if upload.bytes.is_empty() {
        return Err(UploadError::EmptyUpload);
    }
    let size = upload.declared_size.max(upload.bytes.len() as u64);
    if size > limits.max_bytes {
        return Err(UploadError::TooLarge {
            size,
            limit: limits.max_bytes,
        });
    }
    Ok(())
}

/// Admit, ingest, and store an upload.
///
/// Nothing is stored unless every step succeeds.
pub fn upload_dataset(
    store: &dyn DatasetStore,
    upload: RawUpload,
    metadata: UploadMetadata,
    limits: &UploadLimits,
    options: &IngestionOptions,
) -> Result<Dataset, UploadError> {
    admit(&upload, limits)?;

    let (format, table) = ingest_resolved(&upload.bytes, &upload.file_name, &upload.media_type, options)?;

    let RawUpload {
        file_name,
        declared_size,
        ..
    } = upload;

    Ok(store.create_dataset(NewDataset {
        name: metadata
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| file_name.clone()),
        description: metadata.description.unwrap_or_default(),
        file_name,
        file_size: declared_size,
        file_type: format.file_type_label().to_string(),
        uploaded_by: metadata.uploaded_by,
        table,
    }))
}
