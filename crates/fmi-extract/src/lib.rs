//! Extraction of Foundation Medicine reports into fixed-schema tables.
//!
//! Five field extractors turn one [`fmi_ingest::ReportDocument`] into typed
//! rows; [`report::extract_report`] assembles them into per-category frames
//! and [`batch::collect_reports`] stacks those frames across a batch of
//! files.

mod attributes;
pub mod batch;
pub mod datetime;
pub mod error;
pub mod extractors;
pub mod frame;
pub mod report;

pub use batch::{BatchOptions, BatchTables, ProgressEvent, collect_report_dir, collect_reports};
pub use datetime::parse_report_date;
pub use error::{ExtractError, Result};
pub use frame::{TableRow, empty_frame, rows_to_frame};
pub use report::{CategoryFrames, ReportFrames, extract_report};
