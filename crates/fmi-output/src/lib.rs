//! Output generation for extracted FMI report tables.
//!
//! Category tables are inner-joined to the assay and patient table on
//! `report_id` and written as:
//!
//! - **CSV**: one file per table
//! - **XLSX**: one workbook, one worksheet per table

mod common;
pub mod csv;
mod export;
pub mod join;
pub mod xlsx;

pub use common::{ensure_output_dir, ensure_parent_dir};
pub use csv::write_csv;
pub use export::{DEFAULT_WORKBOOK_NAME, ExportFormat, ExportOptions, export_tables};
pub use join::{COLLISION_SUFFIX, JoinedTable, join_on_report_id};
pub use xlsx::write_workbook;
