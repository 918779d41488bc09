//! Typed row records, one struct per extracted table.
//!
//! Field order mirrors the column order in [`crate::schema`]. Optional
//! strings are `None` when the source attribute or element is absent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A point mutation or small indel call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortVariant {
    pub report_id: String,
    pub allele_fraction: f64,
    pub cds_effect: Option<String>,
    pub depth: i64,
    pub equivocal: Option<String>,
    pub functional_effect: Option<String>,
    pub gene: Option<String>,
    pub percent_reads: f64,
    pub position: Option<String>,
    pub protein_effect: Option<String>,
    pub status: Option<String>,
    pub strand: Option<String>,
    pub transcript: Option<String>,
}

/// A gene-level amplification or deletion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyNumberAlteration {
    pub report_id: String,
    pub gene: Option<String>,
    pub alteration_type: Option<String>,
    pub copy_number: f64,
    pub ratio: f64,
    pub number_of_exons: Option<String>,
    pub position: Option<String>,
    pub equivocal: Option<String>,
    pub status: Option<String>,
}

/// A structural variant or fusion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rearrangement {
    pub report_id: String,
    pub targeted_gene: Option<String>,
    pub description: Option<String>,
    pub other_gene: Option<String>,
    pub position_1: Option<String>,
    pub position_2: Option<String>,
    pub status: Option<String>,
    pub supporting_read_pairs: i64,
    pub equivocal: Option<String>,
    pub rearrangement_type: Option<String>,
    pub in_frame: Option<String>,
}

/// A named aggregate assay result such as tumor mutational burden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Biomarker {
    pub report_id: String,
    /// Local tag name of the source element.
    pub biomarker: String,
    pub status: Option<String>,
    pub score: Option<f64>,
    pub unit: Option<String>,
}

/// Patient, clinical, and assay metadata. Exactly one per report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssayAndPatient {
    pub report_id: String,
    pub mrn: Option<String>,
    pub dob: Option<NaiveDate>,
    pub collection_date: Option<NaiveDate>,
    pub received_date: Option<NaiveDate>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub submitted_diagnosis: Option<String>,
    pub gender: Option<String>,
    pub ordering_md: Option<String>,
    pub ordering_md_id: Option<String>,
    pub pathologist: Option<String>,
    pub medical_facility_name: Option<String>,
    pub medical_facility_id: Option<String>,
    pub specimen_site: Option<String>,
    pub country_of_origin: Option<String>,
    pub disease: Option<String>,
    pub disease_ontology: Option<String>,
    pub pathology_diagnosis: Option<String>,
    pub purity_estimate: Option<f64>,
    pub specimen: Option<String>,
    pub study: Option<String>,
    pub test_request: Option<String>,
    pub test_type: Option<String>,
    pub tissue_of_origin: Option<String>,
    pub quality_control: Option<String>,
}

impl AssayAndPatient {
    /// Empty record for a report, every optional field null.
    pub fn new(report_id: impl Into<String>) -> Self {
        Self {
            report_id: report_id.into(),
            ..Self::default()
        }
    }
}
