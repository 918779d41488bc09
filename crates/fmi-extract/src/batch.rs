//! Sequential batch collection across report files.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use fmi_ingest::{ReportDocument, list_report_files};
use fmi_model::Category;

use crate::error::{ExtractError, Result};
use crate::report::{CategoryFrames, extract_report};

/// Options for a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Reports with these ids are parsed but contribute no rows.
    pub excluded_report_ids: BTreeSet<String>,
}

impl BatchOptions {
    pub fn with_excluded<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_report_ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_excluded(&self, report_id: &str) -> bool {
        self.excluded_report_ids.contains(report_id)
    }
}

/// Progress notifications emitted while collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent<'a> {
    Started {
        total: usize,
    },
    Processed {
        /// Zero-based position in the input list.
        index: usize,
        total: usize,
        path: &'a Path,
        report_id: &'a str,
    },
    Skipped {
        index: usize,
        total: usize,
        path: &'a Path,
        report_id: &'a str,
    },
    Finished {
        reports: usize,
    },
}

/// Concatenated tables for every collected report.
#[derive(Debug, Clone)]
pub struct BatchTables {
    pub frames: CategoryFrames,
    /// Report ids in collection order. Excluded reports are not listed.
    pub report_ids: Vec<String>,
}

impl BatchTables {
    pub fn report_count(&self) -> usize {
        self.report_ids.len()
    }

    pub fn get(&self, category: Category) -> &polars::prelude::DataFrame {
        self.frames.get(category)
    }
}

/// Load and extract every file in order, stacking same-category frames.
///
/// The first failing file aborts the batch; its path is attached to the
/// error.
pub fn collect_reports<F>(
    files: &[PathBuf],
    options: &BatchOptions,
    mut on_progress: F,
) -> Result<BatchTables>
where
    F: FnMut(ProgressEvent<'_>),
{
    if files.is_empty() {
        return Err(ExtractError::NoReports);
    }

    let span = info_span!("collect_reports", file_count = files.len());
    let _guard = span.enter();
    let start = Instant::now();
    let total = files.len();
    on_progress(ProgressEvent::Started { total });

    let mut frames = CategoryFrames::empty()?;
    let mut report_ids = Vec::with_capacity(total);
    let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();

    for (index, path) in files.iter().enumerate() {
        let file_start = Instant::now();
        let report = ReportDocument::load(path)
            .map_err(ExtractError::from)
            .and_then(|document| extract_report(&document))
            .map_err(|source| ExtractError::Report {
                path: path.clone(),
                source: Box::new(source),
            })?;

        if options.is_excluded(&report.report_id) {
            debug!(path = %path.display(), report_id = %report.report_id, "report excluded");
            on_progress(ProgressEvent::Skipped {
                index,
                total,
                path,
                report_id: &report.report_id,
            });
            continue;
        }

        if let Some(previous) = seen.get(&report.report_id) {
            warn!(
                report_id = %report.report_id,
                path = %path.display(),
                previous = %previous.display(),
                "duplicate report id; joined rows for this id will be multiplied"
            );
        } else {
            seen.insert(report.report_id.clone(), path.clone());
        }

        frames.append(&report.frames)?;
        debug!(
            path = %path.display(),
            short_variants = report.frames.row_count(Category::ShortVariants),
            copy_number_alterations = report.frames.row_count(Category::CopyNumberAlterations),
            rearrangements = report.frames.row_count(Category::Rearrangements),
            biomarkers = report.frames.row_count(Category::Biomarkers),
            duration_ms = file_start.elapsed().as_millis(),
            "report extracted"
        );
        on_progress(ProgressEvent::Processed {
            index,
            total,
            path,
            report_id: &report.report_id,
        });
        report_ids.push(report.report_id);
    }

    if report_ids.is_empty() {
        return Err(ExtractError::NoReports);
    }

    info!(
        reports = report_ids.len(),
        excluded = total - report_ids.len(),
        short_variants = frames.row_count(Category::ShortVariants),
        copy_number_alterations = frames.row_count(Category::CopyNumberAlterations),
        rearrangements = frames.row_count(Category::Rearrangements),
        biomarkers = frames.row_count(Category::Biomarkers),
        duration_ms = start.elapsed().as_millis(),
        "extraction complete"
    );
    on_progress(ProgressEvent::Finished {
        reports: report_ids.len(),
    });

    Ok(BatchTables { frames, report_ids })
}

/// Discover `*.xml` reports in `dir` and collect them.
pub fn collect_report_dir<F>(dir: &Path, options: &BatchOptions, on_progress: F) -> Result<BatchTables>
where
    F: FnMut(ProgressEvent<'_>),
{
    let files = list_report_files(dir)?;
    collect_reports(&files, options, on_progress)
}
