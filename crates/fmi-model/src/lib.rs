//! Data model for Foundation Medicine report extraction.
//!
//! Defines the five extracted tables: their typed row records, their fixed
//! column schemas, and the summary produced by an export run.

pub mod category;
pub mod rows;
pub mod schema;
pub mod summary;

pub use category::Category;
pub use rows::{AssayAndPatient, Biomarker, CopyNumberAlteration, Rearrangement, ShortVariant};
pub use schema::{ColumnSpec, ColumnType, REPORT_ID, column_names};
pub use summary::{ExportSummary, TableSummary};
