//! Per-category field extractors.
//!
//! Each extractor is a pure function from a parsed report to typed rows.
//! Rows are stamped with the document report id; a document with no
//! matching elements yields an empty vector.

mod assay;
mod biomarkers;
mod copy_number;
mod rearrangements;
mod short_variants;

pub use assay::{PMI_TAG, QUALITY_CONTROL_TAG, VARIANT_REPORT_TAG, assay_and_patient};
pub use biomarkers::{BIOMARKERS_TAG, biomarkers};
pub use copy_number::{COPY_NUMBER_ALTERATION_TAG, copy_number_alterations};
pub use rearrangements::{REARRANGEMENT_TAG, rearrangements};
pub use short_variants::{SHORT_VARIANT_TAG, short_variants};
