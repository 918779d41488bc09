//! Error types for field extraction and batch collection.

use std::path::PathBuf;

use fmi_ingest::IngestError;
use thiserror::Error;

/// Errors raised while turning report documents into tables.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Loading or querying the document failed (malformed XML, missing report id).
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// A structurally required attribute is absent.
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    /// A present attribute cannot be coerced to its declared type.
    #[error("cannot convert {field} value '{value}' to {expected}")]
    Conversion {
        field: String,
        value: String,
        expected: &'static str,
    },

    /// A present date field cannot be parsed as a calendar date.
    #[error("cannot parse {field} value '{value}' as a date")]
    DateParse { field: String, value: String },

    /// The batch had nothing to process.
    #[error("no report files to process")]
    NoReports,

    /// A single report failed; the batch is aborted.
    #[error("failed to process report {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: Box<ExtractError>,
    },

    /// Row values did not line up with the table schema.
    #[error("schema mismatch in {table}: {message}")]
    Schema { table: &'static str, message: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl ExtractError {
    /// Innermost error, unwrapping per-report context.
    pub fn root_cause(&self) -> &ExtractError {
        match self {
            ExtractError::Report { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<polars::prelude::PolarsError> for ExtractError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
