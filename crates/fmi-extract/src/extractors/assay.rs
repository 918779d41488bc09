use chrono::NaiveDate;
use fmi_ingest::{Element, ReportDocument, VARIANT_REPORT_NS};
use fmi_model::AssayAndPatient;

use crate::attributes::{optional_float, optional_string};
use crate::datetime::parse_report_date;
use crate::error::{ExtractError, Result};

/// Un-namespaced patient metadata block.
pub const PMI_TAG: &str = "PMI";
pub const VARIANT_REPORT_TAG: &str = "variant-report";
pub const QUALITY_CONTROL_TAG: &str = "quality-control";

/// Build the single assay and patient row for a report.
///
/// Patient fields are read from the text of `PMI` children, assay fields
/// from `variant-report` attributes. A missing block leaves its fields null.
/// Gender prefers the assay attribute and falls back to the patient block.
pub fn assay_and_patient(document: &ReportDocument) -> Result<Vec<AssayAndPatient>> {
    let mut record = AssayAndPatient::new(document.report_id()?);

    if let Some(pmi) = document.find_first(None, PMI_TAG) {
        let text = |tag: &str| child_text(&pmi, tag);
        record.mrn = text("MRN");
        record.dob = child_date(&pmi, "DOB")?;
        record.collection_date = child_date(&pmi, "CollDate")?;
        record.received_date = child_date(&pmi, "ReceivedDate")?;
        record.first_name = text("FirstName");
        record.last_name = text("LastName");
        record.full_name = text("FullName");
        record.submitted_diagnosis = text("SubmittedDiagnosis");
        record.gender = text("Gender");
        record.ordering_md = text("OrderingMD");
        record.ordering_md_id = text("OrderingMDId");
        record.pathologist = text("Pathologist");
        record.medical_facility_name = text("MedFacilName");
        record.medical_facility_id = text("MedFacilID");
        record.specimen_site = text("SpecSite");
        record.country_of_origin = text("CountryOfOrigin");
    }

    if let Some(assay) = document.find_first(Some(VARIANT_REPORT_NS), VARIANT_REPORT_TAG) {
        if let Some(gender) = assay.attribute("gender").filter(|value| !value.is_empty()) {
            record.gender = Some(gender.to_string());
        }
        record.disease = optional_string(&assay, "disease");
        record.disease_ontology = optional_string(&assay, "disease-ontology");
        record.pathology_diagnosis = optional_string(&assay, "pathology-diagnosis");
        record.purity_estimate = optional_float(&assay, "purity-assessment")?;
        record.specimen = optional_string(&assay, "specimen");
        record.study = optional_string(&assay, "study");
        record.test_request = optional_string(&assay, "test-request");
        record.test_type = optional_string(&assay, "test-type");
        record.tissue_of_origin = optional_string(&assay, "tissue-of-origin");
    }

    record.quality_control = document
        .find_first(Some(VARIANT_REPORT_NS), QUALITY_CONTROL_TAG)
        .and_then(|qc| optional_string(&qc, "status"));

    Ok(vec![record])
}

fn child_text(parent: &Element<'_>, tag: &str) -> Option<String> {
    parent
        .child(None, tag)
        .and_then(|child| child.text())
        .map(str::to_string)
}

fn child_date(parent: &Element<'_>, tag: &str) -> Result<Option<NaiveDate>> {
    let Some(raw) = parent.child(None, tag).and_then(|child| child.text()) else {
        return Ok(None);
    };
    parse_report_date(raw)
        .map(Some)
        .ok_or_else(|| ExtractError::DateParse {
            field: tag.to_string(),
            value: raw.to_string(),
        })
}
