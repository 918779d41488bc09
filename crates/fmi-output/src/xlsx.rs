//! XLSX workbook output, one worksheet per table.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use polars::prelude::{Column, DataFrame, DataType};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet};
use tracing::warn;

use crate::common::ensure_parent_dir;

/// Excel worksheet names are limited to 31 characters.
const MAX_SHEET_NAME_LEN: usize = 31;

const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Write each `(sheet name, frame)` pair as a worksheet, in order.
///
/// The header row is bold and null cells are left blank. Dates are written
/// as Excel dates formatted `yyyy-mm-dd`, unless a column holds a date before
/// 1900, in which case every date in that column is written as ISO text.
pub fn write_workbook(sheets: &[(&str, &DataFrame)], path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let header = Format::new().set_bold();
    let date = Format::new().set_num_format(DATE_FORMAT);

    let mut workbook = Workbook::new();
    for (name, frame) in sheets {
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            bail!("worksheet name too long: {name}");
        }
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(*name)
            .with_context(|| format!("name worksheet {name}"))?;
        write_sheet(worksheet, frame, &header, &date)
            .with_context(|| format!("write worksheet {name}"))?;
    }
    workbook
        .save(path)
        .with_context(|| format!("save {}", path.display()))?;
    Ok(())
}

fn write_sheet(
    worksheet: &mut Worksheet,
    frame: &DataFrame,
    header: &Format,
    date: &Format,
) -> Result<()> {
    for (col, column) in frame.get_columns().iter().enumerate() {
        let col = u16::try_from(col).context("too many columns for a worksheet")?;
        worksheet.write_string_with_format(0, col, column.name().as_str(), header)?;
        write_column(worksheet, col, column, date)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofit();
    Ok(())
}

fn write_column(worksheet: &mut Worksheet, col: u16, column: &Column, date: &Format) -> Result<()> {
    let series = column.as_materialized_series();
    match series.dtype() {
        DataType::String => {
            for (row, value) in series.str()?.into_iter().enumerate() {
                if let Some(value) = value {
                    worksheet.write_string(data_row(row)?, col, value)?;
                }
            }
        }
        DataType::Float64 => {
            for (row, value) in series.f64()?.into_iter().enumerate() {
                if let Some(value) = value {
                    worksheet.write_number(data_row(row)?, col, value)?;
                }
            }
        }
        DataType::Int64 => {
            for (row, value) in series.i64()?.into_iter().enumerate() {
                if let Some(value) = value {
                    // Excel stores every number as a double.
                    worksheet.write_number(data_row(row)?, col, value as f64)?;
                }
            }
        }
        DataType::Date => {
            let dates: Vec<Option<NaiveDate>> = series.date()?.as_date_iter().collect();
            let cells: Option<Vec<Option<ExcelDateTime>>> = dates
                .iter()
                .map(|value| value.map_or(Some(None), |value| excel_date(value).map(Some)))
                .collect();
            match cells {
                Some(cells) => {
                    for (row, cell) in cells.iter().enumerate() {
                        if let Some(cell) = cell {
                            worksheet.write_datetime_with_format(data_row(row)?, col, cell, date)?;
                        }
                    }
                }
                // Excel has no dates before 1900; the whole column becomes ISO text.
                None => {
                    warn!(column = %column.name(), "dates before 1900 written as text");
                    for (row, value) in dates.iter().enumerate() {
                        if let Some(value) = value {
                            worksheet.write_string(data_row(row)?, col, value.to_string())?;
                        }
                    }
                }
            }
        }
        other => bail!("unsupported column type {other} in {}", column.name()),
    }
    Ok(())
}

/// Worksheet row for a zero-based data row, below the header.
fn data_row(index: usize) -> Result<u32> {
    u32::try_from(index + 1).context("too many rows for a worksheet")
}

fn excel_date(date: NaiveDate) -> Option<ExcelDateTime> {
    let year = u16::try_from(date.year()).ok()?;
    // Month and day are always within u8 range.
    ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8).ok()
}
