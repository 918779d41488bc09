//! CSV output.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};

use crate::common::ensure_parent_dir;

/// Write `frame` as CSV with a header row. Nulls are empty cells and dates
/// use ISO `YYYY-MM-DD`.
pub fn write_csv(frame: &DataFrame, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut frame = frame.clone();
    CsvWriter::new(file)
        .include_header(true)
        .with_date_format(Some("%Y-%m-%d".to_string()))
        .finish(&mut frame)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
