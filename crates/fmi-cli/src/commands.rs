use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use fmi_extract::{BatchOptions, collect_reports};
use fmi_ingest::list_report_files;
use fmi_model::ExportSummary;
use fmi_output::{ExportOptions, ensure_parent_dir, export_tables};

use crate::cli::ExtractArgs;
use crate::progress::ReportProgress;

/// Discover, extract, join and export every report in the input directory.
///
/// Extraction finishes for the whole batch before anything is written, so a
/// failing report leaves the output directory untouched.
pub fn run_extract(args: &ExtractArgs) -> Result<ExportSummary> {
    let span = info_span!("extract", input_dir = %args.input_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let files = list_report_files(&args.input_dir)
        .with_context(|| format!("scan {}", args.input_dir.display()))?;
    info!(file_count = files.len(), "report files discovered");

    let options = BatchOptions::with_excluded(args.exclude_report_ids.iter().cloned());
    let mut progress = ReportProgress::new(!args.no_progress && io::stderr().is_terminal());
    let collected = collect_reports(&files, &options, |event| progress.handle(event));
    let tables = match collected {
        Ok(tables) => tables,
        Err(error) => {
            progress.abandon();
            return Err(error).context("extract reports");
        }
    };

    let export_options = ExportOptions::new(&args.output_dir)
        .with_format(args.format.into())
        .with_workbook_name(&args.workbook_name);
    let summary = export_tables(&tables, &export_options)
        .with_context(|| format!("export to {}", args.output_dir.display()))?;

    if let Some(path) = &args.summary_json {
        write_summary_json(&summary, path)?;
    }

    info!(
        reports = summary.report_count,
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );
    Ok(summary)
}

/// Write `summary` as pretty-printed JSON.
pub fn write_summary_json(summary: &ExportSummary, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(summary).context("serialize summary")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
