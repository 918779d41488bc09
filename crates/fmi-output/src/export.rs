//! Export of a collected batch to CSV files and a workbook.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use fmi_extract::BatchTables;
use fmi_model::{Category, ExportSummary, TableSummary};

use crate::common::ensure_output_dir;
use crate::csv::write_csv;
use crate::join::{JoinedTable, join_on_report_id};
use crate::xlsx::write_workbook;

/// Default workbook file name.
pub const DEFAULT_WORKBOOK_NAME: &str = "fmi_report.xlsx";

/// Which artifacts to write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
    #[default]
    Both,
}

impl ExportFormat {
    pub fn writes_csv(self) -> bool {
        matches!(self, Self::Csv | Self::Both)
    }

    pub fn writes_xlsx(self) -> bool {
        matches!(self, Self::Xlsx | Self::Both)
    }
}

/// Options for [`export_tables`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    pub format: ExportFormat,
    pub workbook_name: String,
}

impl ExportOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            format: ExportFormat::default(),
            workbook_name: DEFAULT_WORKBOOK_NAME.to_string(),
        }
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_workbook_name(mut self, name: impl Into<String>) -> Self {
        self.workbook_name = name.into();
        self
    }
}

/// Join every category table to the assay and patient table and write the
/// selected artifacts.
///
/// The assay and patient table is written unjoined and comes first, both
/// as a CSV file and as the first worksheet.
pub fn export_tables(tables: &BatchTables, options: &ExportOptions) -> Result<ExportSummary> {
    let span = info_span!("export", output_dir = %options.output_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let output_dir = ensure_output_dir(&options.output_dir)?;
    let assay = tables.get(Category::AssayAndPatientData);

    let joined = Category::JOINED
        .into_iter()
        .map(|category| join_on_report_id(category, tables.get(category), assay))
        .collect::<Result<Vec<JoinedTable>>>()?;

    let mut summary = ExportSummary {
        output_dir: output_dir.clone(),
        report_count: tables.report_count(),
        ..ExportSummary::default()
    };
    summary.tables.push(TableSummary {
        category: Category::AssayAndPatientData,
        rows: assay.height(),
        dropped_rows: 0,
    });
    summary
        .tables
        .extend(joined.iter().map(|table| TableSummary {
            category: table.category,
            rows: table.frame.height(),
            dropped_rows: table.dropped_rows,
        }));

    let mut outputs = vec![(Category::AssayAndPatientData, assay)];
    outputs.extend(joined.iter().map(|table| (table.category, &table.frame)));

    if options.format.writes_csv() {
        for (category, frame) in &outputs {
            let path = output_dir.join(category.csv_file_name());
            write_csv(frame, &path)?;
            debug!(path = %path.display(), rows = frame.height(), "csv written");
            summary.csv_files.push(path);
        }
    }

    if options.format.writes_xlsx() {
        let path = output_dir.join(&options.workbook_name);
        let sheets: Vec<(&str, &DataFrame)> = outputs
            .iter()
            .map(|(category, frame)| (category.table_name(), *frame))
            .collect();
        write_workbook(&sheets, &path)?;
        debug!(path = %path.display(), sheets = sheets.len(), "workbook written");
        summary.workbook = Some(path);
    }

    info!(
        reports = summary.report_count,
        csv_files = summary.csv_files.len(),
        workbook = summary.workbook.is_some(),
        dropped_rows = summary.total_dropped_rows(),
        duration_ms = start.elapsed().as_millis(),
        "export complete"
    );
    Ok(summary)
}
