//! Tests for fmi-model types.

use std::path::PathBuf;

use fmi_model::{AssayAndPatient, Category, ExportSummary, TableSummary};

#[test]
fn summary_counts_dropped_rows() {
    let summary = ExportSummary {
        output_dir: PathBuf::from("out"),
        csv_files: vec![],
        workbook: None,
        report_count: 2,
        tables: vec![
            TableSummary {
                category: Category::ShortVariants,
                rows: 10,
                dropped_rows: 2,
            },
            TableSummary {
                category: Category::Biomarkers,
                rows: 4,
                dropped_rows: 1,
            },
        ],
    };
    assert_eq!(summary.total_dropped_rows(), 3);
    assert_eq!(summary.table(Category::Biomarkers).map(|t| t.rows), Some(4));
    assert!(summary.table(Category::Rearrangements).is_none());
}

#[test]
fn summary_serializes_with_snake_case_categories() {
    let summary = ExportSummary {
        output_dir: PathBuf::from("out"),
        report_count: 1,
        tables: vec![TableSummary {
            category: Category::CopyNumberAlterations,
            rows: 3,
            dropped_rows: 0,
        }],
        ..ExportSummary::default()
    };
    let json = serde_json::to_string(&summary).expect("serialize summary");
    assert!(json.contains("\"copy_number_alterations\""));
    let round: ExportSummary = serde_json::from_str(&json).expect("deserialize summary");
    assert_eq!(round, summary);
}

#[test]
fn new_assay_record_is_all_null() {
    let record = AssayAndPatient::new("TRF000001");
    assert_eq!(record.report_id, "TRF000001");
    assert!(record.mrn.is_none());
    assert!(record.dob.is_none());
    assert!(record.purity_estimate.is_none());
}
