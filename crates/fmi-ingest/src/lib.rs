//! FMI report ingestion.
//!
//! This crate discovers report files in an input folder and parses each one
//! into a namespace-aware element tree that the extractors query.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use fmi_ingest::{VARIANT_REPORT_NS, ReportDocument, list_report_files};
//!
//! for path in list_report_files(Path::new("reports"))? {
//!     let document = ReportDocument::load(&path)?;
//!     let variants = document.find_all(Some(VARIANT_REPORT_NS), "short-variant");
//!     println!("{}: {} short variants", document.report_id()?, variants.len());
//! }
//! ```

mod discovery;
mod document;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::{REPORT_EXTENSION, list_files_with_extension, list_report_files};

// === Document Loading ===
pub use document::{Element, REPORT_ID_TAG, ReportDocument, VARIANT_REPORT_NS};
