use fmi_ingest::{ReportDocument, VARIANT_REPORT_NS};
use fmi_model::CopyNumberAlteration;

use crate::attributes::{optional_string, required_float};
use crate::error::Result;

pub const COPY_NUMBER_ALTERATION_TAG: &str = "copy-number-alteration";

/// Extract every `copy-number-alteration` element.
///
/// `copy-number` and `ratio` are required.
pub fn copy_number_alterations(document: &ReportDocument) -> Result<Vec<CopyNumberAlteration>> {
    let report_id = document.report_id()?;
    document
        .find_all(Some(VARIANT_REPORT_NS), COPY_NUMBER_ALTERATION_TAG)
        .iter()
        .map(|element| {
            Ok(CopyNumberAlteration {
                report_id: report_id.to_string(),
                gene: optional_string(element, "gene"),
                alteration_type: optional_string(element, "type"),
                copy_number: required_float(element, "copy-number")?,
                ratio: required_float(element, "ratio")?,
                number_of_exons: optional_string(element, "number-of-exons"),
                position: optional_string(element, "position"),
                equivocal: optional_string(element, "equivocal"),
                status: optional_string(element, "status"),
            })
        })
        .collect()
}
