//! Fixed column schemas for the extracted tables.
//!
//! Every table is built from these lists regardless of which optional
//! attributes a given report carries, so frames from different reports can
//! always be stacked.

use serde::{Deserialize, Serialize};

/// Name of the join key column present in every table.
pub const REPORT_ID: &str = "report_id";

/// Logical column type of an extracted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// Nullable UTF-8 string.
    Utf8,
    Float64,
    Int64,
    /// Calendar date without time zone.
    Date,
}

/// A named, typed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub dtype: ColumnType,
}

const fn utf8(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        dtype: ColumnType::Utf8,
    }
}

const fn float64(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        dtype: ColumnType::Float64,
    }
}

const fn int64(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        dtype: ColumnType::Int64,
    }
}

const fn date(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        dtype: ColumnType::Date,
    }
}

pub const SHORT_VARIANT_COLUMNS: &[ColumnSpec] = &[
    utf8(REPORT_ID),
    float64("allele_fraction"),
    utf8("cds_effect"),
    int64("depth"),
    utf8("equivocal"),
    utf8("functional_effect"),
    utf8("gene"),
    float64("percent_reads"),
    utf8("position"),
    utf8("protein_effect"),
    utf8("status"),
    utf8("strand"),
    utf8("transcript"),
];

pub const COPY_NUMBER_ALTERATION_COLUMNS: &[ColumnSpec] = &[
    utf8(REPORT_ID),
    utf8("gene"),
    utf8("type"),
    float64("copy_number"),
    float64("ratio"),
    utf8("number_of_exons"),
    utf8("position"),
    utf8("equivocal"),
    utf8("status"),
];

pub const REARRANGEMENT_COLUMNS: &[ColumnSpec] = &[
    utf8(REPORT_ID),
    utf8("targeted_gene"),
    utf8("description"),
    utf8("other_gene"),
    utf8("position_1"),
    utf8("position_2"),
    utf8("status"),
    int64("supporting_read_pairs"),
    utf8("equivocal"),
    utf8("type"),
    utf8("in_frame"),
];

pub const BIOMARKER_COLUMNS: &[ColumnSpec] = &[
    utf8(REPORT_ID),
    utf8("biomarker"),
    utf8("status"),
    float64("score"),
    utf8("unit"),
];

pub const ASSAY_AND_PATIENT_COLUMNS: &[ColumnSpec] = &[
    utf8(REPORT_ID),
    utf8("mrn"),
    date("dob"),
    date("collection_date"),
    date("received_date"),
    utf8("first_name"),
    utf8("last_name"),
    utf8("full_name"),
    utf8("submitted_diagnosis"),
    utf8("gender"),
    utf8("ordering_md"),
    utf8("ordering_md_id"),
    utf8("pathologist"),
    utf8("medical_facility_name"),
    utf8("medical_facility_id"),
    utf8("specimen_site"),
    utf8("country_of_origin"),
    utf8("disease"),
    utf8("disease_ontology"),
    utf8("pathology_diagnosis"),
    float64("purity_estimate"),
    utf8("specimen"),
    utf8("study"),
    utf8("test_request"),
    utf8("test_type"),
    utf8("tissue_of_origin"),
    utf8("quality_control"),
];

/// Column names of a schema, in order.
pub fn column_names(columns: &[ColumnSpec]) -> Vec<&'static str> {
    columns.iter().map(|column| column.name).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::Category;

    #[test]
    fn every_schema_starts_with_the_report_id() {
        for category in Category::ALL {
            let first = category.columns()[0];
            assert_eq!(first.name, REPORT_ID);
            assert_eq!(first.dtype, ColumnType::Utf8);
        }
    }

    #[test]
    fn column_names_are_unique_within_a_table() {
        for category in Category::ALL {
            let names = column_names(category.columns());
            let unique: BTreeSet<_> = names.iter().collect();
            assert_eq!(names.len(), unique.len(), "{category}");
        }
    }

    #[test]
    fn variant_columns_do_not_collide_with_patient_columns() {
        let patient: BTreeSet<_> = column_names(ASSAY_AND_PATIENT_COLUMNS)
            .into_iter()
            .filter(|name| *name != REPORT_ID)
            .collect();
        for category in Category::JOINED {
            for column in category.columns() {
                assert!(!patient.contains(column.name), "{category}.{}", column.name);
            }
        }
    }
}
