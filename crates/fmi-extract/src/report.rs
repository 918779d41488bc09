//! Per-report aggregation of the five category tables.

use polars::prelude::DataFrame;

use fmi_ingest::ReportDocument;
use fmi_model::Category;

use crate::error::Result;
use crate::extractors;
use crate::frame::{empty_frame, rows_to_frame};

/// One frame per category, always with the full category schema.
#[derive(Debug, Clone)]
pub struct CategoryFrames {
    pub assay_and_patient_data: DataFrame,
    pub short_variants: DataFrame,
    pub copy_number_alterations: DataFrame,
    pub rearrangements: DataFrame,
    pub biomarkers: DataFrame,
}

impl CategoryFrames {
    /// Zero-row frames for every category.
    pub fn empty() -> Result<Self> {
        Ok(Self {
            assay_and_patient_data: empty_frame(Category::AssayAndPatientData)?,
            short_variants: empty_frame(Category::ShortVariants)?,
            copy_number_alterations: empty_frame(Category::CopyNumberAlterations)?,
            rearrangements: empty_frame(Category::Rearrangements)?,
            biomarkers: empty_frame(Category::Biomarkers)?,
        })
    }

    pub fn get(&self, category: Category) -> &DataFrame {
        match category {
            Category::AssayAndPatientData => &self.assay_and_patient_data,
            Category::ShortVariants => &self.short_variants,
            Category::CopyNumberAlterations => &self.copy_number_alterations,
            Category::Rearrangements => &self.rearrangements,
            Category::Biomarkers => &self.biomarkers,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut DataFrame {
        match category {
            Category::AssayAndPatientData => &mut self.assay_and_patient_data,
            Category::ShortVariants => &mut self.short_variants,
            Category::CopyNumberAlterations => &mut self.copy_number_alterations,
            Category::Rearrangements => &mut self.rearrangements,
            Category::Biomarkers => &mut self.biomarkers,
        }
    }

    /// Append `other` below `self`, category by category.
    pub fn append(&mut self, other: &CategoryFrames) -> Result<()> {
        for category in Category::ALL {
            self.get_mut(category).vstack_mut(other.get(category))?;
        }
        Ok(())
    }

    pub fn row_count(&self, category: Category) -> usize {
        self.get(category).height()
    }
}

/// Tables extracted from a single report.
#[derive(Debug, Clone)]
pub struct ReportFrames {
    pub report_id: String,
    pub frames: CategoryFrames,
}

/// Run every extractor against one document.
pub fn extract_report(document: &ReportDocument) -> Result<ReportFrames> {
    let frames = CategoryFrames {
        assay_and_patient_data: rows_to_frame(&extractors::assay_and_patient(document)?)?,
        short_variants: rows_to_frame(&extractors::short_variants(document)?)?,
        copy_number_alterations: rows_to_frame(&extractors::copy_number_alterations(document)?)?,
        rearrangements: rows_to_frame(&extractors::rearrangements(document)?)?,
        biomarkers: rows_to_frame(&extractors::biomarkers(document)?)?,
    };
    Ok(ReportFrames {
        report_id: document.report_id()?.to_string(),
        frames,
    })
}
