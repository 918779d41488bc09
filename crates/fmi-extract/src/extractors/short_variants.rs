use fmi_ingest::{ReportDocument, VARIANT_REPORT_NS};
use fmi_model::ShortVariant;

use crate::attributes::{float_or, int_or, optional_string};
use crate::error::Result;

pub const SHORT_VARIANT_TAG: &str = "short-variant";

/// Extract every `short-variant` element, at any depth.
///
/// Allele fraction, depth and percent reads default to zero when absent.
pub fn short_variants(document: &ReportDocument) -> Result<Vec<ShortVariant>> {
    let report_id = document.report_id()?;
    document
        .find_all(Some(VARIANT_REPORT_NS), SHORT_VARIANT_TAG)
        .iter()
        .map(|element| {
            Ok(ShortVariant {
                report_id: report_id.to_string(),
                allele_fraction: float_or(element, "allele-fraction", 0.0)?,
                cds_effect: optional_string(element, "cds-effect"),
                depth: int_or(element, "depth", 0)?,
                equivocal: optional_string(element, "equivocal"),
                functional_effect: optional_string(element, "functional-effect"),
                gene: optional_string(element, "gene"),
                percent_reads: float_or(element, "percent-reads", 0.0)?,
                position: optional_string(element, "position"),
                protein_effect: optional_string(element, "protein-effect"),
                status: optional_string(element, "status"),
                strand: optional_string(element, "strand"),
                transcript: optional_string(element, "transcript"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;

    fn report(body: &str) -> ReportDocument {
        let xml = format!(
            r#"<ResultsReport><ReportId>TRF1</ReportId>
            <variant-report xmlns="{VARIANT_REPORT_NS}"><short-variants>{body}</short-variants></variant-report>
            </ResultsReport>"#
        );
        ReportDocument::parse_str(&xml, "TRF1.xml").unwrap()
    }

    #[test]
    fn test_present_and_absent_attributes() {
        let document =
            report(r#"<short-variant allele-fraction="0.35" depth="120" gene="EGFR"/>"#);
        let rows = short_variants(&document).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.report_id, "TRF1");
        assert!((row.allele_fraction - 0.35).abs() < 1e-12);
        assert_eq!(row.depth, 120);
        assert_eq!(row.gene.as_deref(), Some("EGFR"));
        assert_eq!(row.cds_effect, None);
        assert_eq!(row.percent_reads, 0.0);
    }

    #[test]
    fn test_defaults_for_usually_present_numbers() {
        let rows = short_variants(&report(r#"<short-variant gene="KRAS"/>"#)).unwrap();
        assert_eq!(rows[0].allele_fraction, 0.0);
        assert_eq!(rows[0].depth, 0);
        assert_eq!(rows[0].percent_reads, 0.0);
    }

    #[test]
    fn test_document_order_and_empty_attribute() {
        let rows = short_variants(&report(
            r#"<short-variant gene="TP53" position=""/><short-variant gene="PIK3CA"/>"#,
        ))
        .unwrap();
        let genes: Vec<_> = rows.iter().map(|row| row.gene.as_deref()).collect();
        assert_eq!(genes, vec![Some("TP53"), Some("PIK3CA")]);
        assert_eq!(rows[0].position.as_deref(), Some(""));
        assert_eq!(rows[1].position, None);
    }

    #[test]
    fn test_unparseable_depth() {
        let err = short_variants(&report(r#"<short-variant depth="many"/>"#)).unwrap_err();
        assert!(matches!(err, ExtractError::Conversion { ref field, .. } if field == "depth"));
    }

    #[test]
    fn test_unnamespaced_elements_are_ignored() {
        let xml = r#"<ResultsReport><ReportId>TRF1</ReportId><short-variant gene="X"/></ResultsReport>"#;
        let document = ReportDocument::parse_str(xml, "TRF1.xml").unwrap();
        assert!(short_variants(&document).unwrap().is_empty());
    }
}
