//! Row records to fixed-schema Polars frames.
//!
//! Column names and dtypes always come from the category schema in
//! `fmi_model::schema`, never from the rows themselves, so a report with no
//! rows for a category still yields a frame with the full set of columns.

use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use fmi_model::{
    AssayAndPatient, Biomarker, Category, ColumnType, CopyNumberAlteration, Rearrangement,
    ShortVariant,
};

use crate::error::{ExtractError, Result};

/// One typed cell value. The variant must match the schema column type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Text(Option<&'a str>),
    Float(Option<f64>),
    Int(Option<i64>),
    Date(Option<NaiveDate>),
}

impl<'a> Cell<'a> {
    fn text(value: &'a Option<String>) -> Self {
        Cell::Text(value.as_deref())
    }
}

/// A record that maps onto one category's schema.
pub trait TableRow {
    const CATEGORY: Category;

    /// Cell values in schema column order.
    fn cells(&self) -> Vec<Cell<'_>>;
}

enum ColumnBuffer {
    Utf8(Vec<Option<String>>),
    Float64(Vec<Option<f64>>),
    Int64(Vec<Option<i64>>),
    Date(Vec<Option<NaiveDate>>),
}

impl ColumnBuffer {
    fn new(dtype: ColumnType, capacity: usize) -> Self {
        match dtype {
            ColumnType::Utf8 => Self::Utf8(Vec::with_capacity(capacity)),
            ColumnType::Float64 => Self::Float64(Vec::with_capacity(capacity)),
            ColumnType::Int64 => Self::Int64(Vec::with_capacity(capacity)),
            ColumnType::Date => Self::Date(Vec::with_capacity(capacity)),
        }
    }

    fn push<'c>(&mut self, cell: Cell<'c>) -> std::result::Result<(), Cell<'c>> {
        match (self, cell) {
            (Self::Utf8(values), Cell::Text(value)) => values.push(value.map(str::to_string)),
            (Self::Float64(values), Cell::Float(value)) => values.push(value),
            (Self::Int64(values), Cell::Int(value)) => values.push(value),
            (Self::Date(values), Cell::Date(value)) => values.push(value),
            (_, other) => return Err(other),
        }
        Ok(())
    }

    fn into_column(self, name: &str) -> Result<Column> {
        let series = match self {
            Self::Utf8(values) => Series::new(name.into(), values),
            Self::Float64(values) => Series::new(name.into(), values),
            Self::Int64(values) => Series::new(name.into(), values),
            Self::Date(values) => Series::new(name.into(), values),
        };
        Ok(series.into_column())
    }
}

/// Build a frame for `R::CATEGORY` from typed rows.
pub fn rows_to_frame<R: TableRow>(rows: &[R]) -> Result<DataFrame> {
    let category = R::CATEGORY;
    let specs = category.columns();
    let mut buffers: Vec<ColumnBuffer> = specs
        .iter()
        .map(|spec| ColumnBuffer::new(spec.dtype, rows.len()))
        .collect();

    for row in rows {
        let cells = row.cells();
        if cells.len() != specs.len() {
            return Err(ExtractError::Schema {
                table: category.table_name(),
                message: format!("expected {} cells, got {}", specs.len(), cells.len()),
            });
        }
        for ((buffer, cell), spec) in buffers.iter_mut().zip(cells).zip(specs) {
            buffer.push(cell).map_err(|cell| ExtractError::Schema {
                table: category.table_name(),
                message: format!("column {} ({:?}) cannot hold {cell:?}", spec.name, spec.dtype),
            })?;
        }
    }

    finish(category, buffers)
}

/// Zero-row frame with the full schema of `category`.
pub fn empty_frame(category: Category) -> Result<DataFrame> {
    let buffers = category
        .columns()
        .iter()
        .map(|spec| ColumnBuffer::new(spec.dtype, 0))
        .collect();
    finish(category, buffers)
}

fn finish(category: Category, buffers: Vec<ColumnBuffer>) -> Result<DataFrame> {
    let columns = category
        .columns()
        .iter()
        .zip(buffers)
        .map(|(spec, buffer)| buffer.into_column(spec.name))
        .collect::<Result<Vec<_>>>()?;
    Ok(DataFrame::new(columns)?)
}

impl TableRow for ShortVariant {
    const CATEGORY: Category = Category::ShortVariants;

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Text(Some(self.report_id.as_str())),
            Cell::Float(Some(self.allele_fraction)),
            Cell::text(&self.cds_effect),
            Cell::Int(Some(self.depth)),
            Cell::text(&self.equivocal),
            Cell::text(&self.functional_effect),
            Cell::text(&self.gene),
            Cell::Float(Some(self.percent_reads)),
            Cell::text(&self.position),
            Cell::text(&self.protein_effect),
            Cell::text(&self.status),
            Cell::text(&self.strand),
            Cell::text(&self.transcript),
        ]
    }
}

impl TableRow for CopyNumberAlteration {
    const CATEGORY: Category = Category::CopyNumberAlterations;

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Text(Some(self.report_id.as_str())),
            Cell::text(&self.gene),
            Cell::text(&self.alteration_type),
            Cell::Float(Some(self.copy_number)),
            Cell::Float(Some(self.ratio)),
            Cell::text(&self.number_of_exons),
            Cell::text(&self.position),
            Cell::text(&self.equivocal),
            Cell::text(&self.status),
        ]
    }
}

impl TableRow for Rearrangement {
    const CATEGORY: Category = Category::Rearrangements;

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Text(Some(self.report_id.as_str())),
            Cell::text(&self.targeted_gene),
            Cell::text(&self.description),
            Cell::text(&self.other_gene),
            Cell::text(&self.position_1),
            Cell::text(&self.position_2),
            Cell::text(&self.status),
            Cell::Int(Some(self.supporting_read_pairs)),
            Cell::text(&self.equivocal),
            Cell::text(&self.rearrangement_type),
            Cell::text(&self.in_frame),
        ]
    }
}

impl TableRow for Biomarker {
    const CATEGORY: Category = Category::Biomarkers;

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Text(Some(self.report_id.as_str())),
            Cell::Text(Some(self.biomarker.as_str())),
            Cell::text(&self.status),
            Cell::Float(self.score),
            Cell::text(&self.unit),
        ]
    }
}

impl TableRow for AssayAndPatient {
    const CATEGORY: Category = Category::AssayAndPatientData;

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Text(Some(self.report_id.as_str())),
            Cell::text(&self.mrn),
            Cell::Date(self.dob),
            Cell::Date(self.collection_date),
            Cell::Date(self.received_date),
            Cell::text(&self.first_name),
            Cell::text(&self.last_name),
            Cell::text(&self.full_name),
            Cell::text(&self.submitted_diagnosis),
            Cell::text(&self.gender),
            Cell::text(&self.ordering_md),
            Cell::text(&self.ordering_md_id),
            Cell::text(&self.pathologist),
            Cell::text(&self.medical_facility_name),
            Cell::text(&self.medical_facility_id),
            Cell::text(&self.specimen_site),
            Cell::text(&self.country_of_origin),
            Cell::text(&self.disease),
            Cell::text(&self.disease_ontology),
            Cell::text(&self.pathology_diagnosis),
            Cell::Float(self.purity_estimate),
            Cell::text(&self.specimen),
            Cell::text(&self.study),
            Cell::text(&self.test_request),
            Cell::text(&self.test_type),
            Cell::text(&self.tissue_of_origin),
            Cell::text(&self.quality_control),
        ]
    }
}
