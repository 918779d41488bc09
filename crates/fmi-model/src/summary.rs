use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Category;

/// Row accounting for one exported table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    pub category: Category,
    /// Rows written after the join.
    pub rows: usize,
    /// Rows dropped because their report id had no assay and patient row.
    pub dropped_rows: usize,
}

/// Result of one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub output_dir: PathBuf,
    pub csv_files: Vec<PathBuf>,
    pub workbook: Option<PathBuf>,
    pub report_count: usize,
    pub tables: Vec<TableSummary>,
}

impl ExportSummary {
    pub fn total_dropped_rows(&self) -> usize {
        self.tables.iter().map(|table| table.dropped_rows).sum()
    }

    pub fn table(&self, category: Category) -> Option<&TableSummary> {
        self.tables.iter().find(|table| table.category == category)
    }
}
