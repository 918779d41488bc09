//! Error types for report ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering or loading report files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === XML Errors ===
    /// The document is not well-formed XML.
    #[error("malformed XML in {path} at byte {position}: {message}")]
    XmlParse {
        path: PathBuf,
        position: u64,
        message: String,
    },

    /// A structurally required element is absent or empty.
    #[error("required field '{field}' missing in {path}")]
    MissingField { field: String, path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::MissingField {
            field: "ReportId".to_string(),
            path: PathBuf::from("/reports/TRF1.xml"),
        };
        assert_eq!(
            err.to_string(),
            "required field 'ReportId' missing in /reports/TRF1.xml"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let err = IngestError::XmlParse {
            path: PathBuf::from("a.xml"),
            position: 12,
            message: "unexpected end of file".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed XML in a.xml at byte 12: unexpected end of file"
        );
    }
}
