use fmi_ingest::{ReportDocument, VARIANT_REPORT_NS};
use fmi_model::Rearrangement;

use crate::attributes::{optional_string, required_int};
use crate::error::Result;

pub const REARRANGEMENT_TAG: &str = "rearrangement";

/// Extract every `rearrangement` element. `supporting-read-pairs` is required.
pub fn rearrangements(document: &ReportDocument) -> Result<Vec<Rearrangement>> {
    let report_id = document.report_id()?;
    document
        .find_all(Some(VARIANT_REPORT_NS), REARRANGEMENT_TAG)
        .iter()
        .map(|element| {
            Ok(Rearrangement {
                report_id: report_id.to_string(),
                targeted_gene: optional_string(element, "targeted-gene"),
                description: optional_string(element, "description"),
                other_gene: optional_string(element, "other-gene"),
                position_1: optional_string(element, "pos1"),
                position_2: optional_string(element, "pos2"),
                status: optional_string(element, "status"),
                supporting_read_pairs: required_int(element, "supporting-read-pairs")?,
                equivocal: optional_string(element, "equivocal"),
                rearrangement_type: optional_string(element, "type"),
                in_frame: optional_string(element, "in-frame"),
            })
        })
        .collect()
}
