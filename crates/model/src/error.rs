//! Error types for the telemetry merge pipeline.

use std::path::PathBuf;

use crate::record::SourceFormat;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Every way a merge run can abort.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An input artifact does not exist.
    #[error("{}: {source}", path.display())]
    ArtifactNotFound {
        /// The location that was requested.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input artifact is not JSON, or not an array of records of the expected shape.
    #[error("{}: {source}", path.display())]
    MalformedStructuredText {
        /// The artifact that failed to parse.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record lacks a required field (absent or `null`).
    #[error("{format} record #{index} is missing field `{field}`")]
    MissingField {
        format: SourceFormat,
        /// Zero-based position of the record in its artifact.
        index: usize,
        field: &'static str,
    },

    /// A format A record carries a timestamp that is not ISO-8601.
    #[error("format A record #{index} has malformed timestamp {value:?}: {source}")]
    MalformedTimestamp {
        index: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Anything else, e.g. an unwritable output location.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification used when reporting a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    ArtifactNotFound,
    MalformedStructuredText,
    Other,
}

impl Error {
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ArtifactNotFound { .. } => ErrorCategory::ArtifactNotFound,
            Self::MalformedStructuredText { .. } => ErrorCategory::MalformedStructuredText,
            Self::MissingField { .. } | Self::MalformedTimestamp { .. } | Self::Other(_) => {
                ErrorCategory::Other
            }
        }
    }

    pub(crate) fn missing_field(format: SourceFormat, index: usize, field: &'static str) -> Self {
        Self::MissingField {
            format,
            index,
            field,
        }
    }
}
