use fmi_ingest::{ReportDocument, VARIANT_REPORT_NS};
use fmi_model::Biomarker;

use crate::attributes::{optional_float, optional_string};
use crate::error::Result;

pub const BIOMARKERS_TAG: &str = "biomarkers";

/// One row per element child of the first `biomarkers` container, named by
/// the child's local tag. No container means no rows.
pub fn biomarkers(document: &ReportDocument) -> Result<Vec<Biomarker>> {
    let report_id = document.report_id()?;
    let Some(container) = document.find_first(Some(VARIANT_REPORT_NS), BIOMARKERS_TAG) else {
        return Ok(Vec::new());
    };

    container
        .children()
        .map(|element| {
            Ok(Biomarker {
                report_id: report_id.to_string(),
                biomarker: element.local_name().to_string(),
                status: optional_string(&element, "status"),
                score: optional_float(&element, "score")?,
                unit: optional_string(&element, "unit"),
            })
        })
        .collect()
}
