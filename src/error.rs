use std::error::Error as StdError;

use thiserror::Error;

/// Boxed underlying cause carried by [`IngestError::MalformedInput`].
pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Convenience result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Error type returned by the ingestion pipeline.
///
/// Every variant is terminal for the upload it was raised for. The underlying decoder error (if
/// any) is available through [`std::error::Error::source`] so callers can log it.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The declared media type / file extension matches no parser, or a container has no usable
    /// content (e.g. a workbook with zero sheets).
    #[error("unsupported format: {message}")]
    UnsupportedFormat { message: String },

    /// The bytes do not conform to the encoding or syntax of the detected format.
    #[error("malformed input: {message}")]
    MalformedInput {
        message: String,
        #[source]
        source: Option<BoxedCause>,
    },

    /// A parser produced rows but no usable column list.
    #[error("schema derivation failed: {message}")]
    SchemaDerivationFailed { message: String },
}

impl IngestError {
    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn malformed_with(message: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        Self::MalformedInput {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// HTTP status an upload handler should answer with. All ingestion failures are client errors.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UnsupportedFormat { .. }
            | Self::MalformedInput { .. }
            | Self::SchemaDerivationFailed { .. } => 400,
        }
    }
}

impl From<std::str::Utf8Error> for IngestError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::malformed_with(format!("input is not valid utf-8 text ({err})"), err)
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        let message = match err.position() {
            Some(pos) => format!("invalid delimited text at line {}", pos.line()),
            None => "invalid delimited text".to_string(),
        };
        Self::malformed_with(message, err)
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed_with(
            format!("invalid json at line {} column {}", err.line(), err.column()),
            err,
        )
    }
}

#[cfg(feature = "excel")]
impl From<calamine::Error> for IngestError {
    fn from(err: calamine::Error) -> Self {
        Self::malformed_with("invalid workbook", err)
    }
}
