use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::{
    ASSAY_AND_PATIENT_COLUMNS, BIOMARKER_COLUMNS, COPY_NUMBER_ALTERATION_COLUMNS, ColumnSpec,
    REARRANGEMENT_COLUMNS, SHORT_VARIANT_COLUMNS,
};

/// One of the five tables extracted from every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AssayAndPatientData,
    ShortVariants,
    CopyNumberAlterations,
    Rearrangements,
    Biomarkers,
}

impl Category {
    /// Export order: patient metadata first, then the variant categories.
    pub const ALL: [Category; 5] = [
        Category::AssayAndPatientData,
        Category::ShortVariants,
        Category::CopyNumberAlterations,
        Category::Rearrangements,
        Category::Biomarkers,
    ];

    /// Categories that are joined against the assay and patient table.
    pub const JOINED: [Category; 4] = [
        Category::ShortVariants,
        Category::CopyNumberAlterations,
        Category::Rearrangements,
        Category::Biomarkers,
    ];

    /// Table name, used for CSV file names and workbook sheet names.
    pub fn table_name(self) -> &'static str {
        match self {
            Category::AssayAndPatientData => "assay_and_patient_data",
            Category::ShortVariants => "short_variants",
            Category::CopyNumberAlterations => "copy_number_alterations",
            Category::Rearrangements => "rearrangements",
            Category::Biomarkers => "biomarkers",
        }
    }

    /// Human readable label for summaries.
    pub fn label(self) -> &'static str {
        match self {
            Category::AssayAndPatientData => "Assay & patient data",
            Category::ShortVariants => "Short variants",
            Category::CopyNumberAlterations => "Copy number alterations",
            Category::Rearrangements => "Rearrangements",
            Category::Biomarkers => "Biomarkers",
        }
    }

    /// Fixed column schema of the extracted (unjoined) table.
    pub fn columns(self) -> &'static [ColumnSpec] {
        match self {
            Category::AssayAndPatientData => ASSAY_AND_PATIENT_COLUMNS,
            Category::ShortVariants => SHORT_VARIANT_COLUMNS,
            Category::CopyNumberAlterations => COPY_NUMBER_ALTERATION_COLUMNS,
            Category::Rearrangements => REARRANGEMENT_COLUMNS,
            Category::Biomarkers => BIOMARKER_COLUMNS,
        }
    }

    pub fn csv_file_name(self) -> String {
        format!("{}.csv", self.table_name())
    }

    pub fn is_joined(self) -> bool {
        !matches!(self, Category::AssayAndPatientData)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}
