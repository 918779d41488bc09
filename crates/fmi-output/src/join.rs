//! Inner equi-join of category tables against assay and patient data.

use std::collections::HashSet;

use anyhow::{Context, Result};
use polars::prelude::{DataFrame, DataFrameJoinOps, JoinArgs, JoinType, MaintainOrderJoin};
use tracing::warn;

use fmi_model::{Category, REPORT_ID};

/// Suffix for assay columns whose name is already used by the category table.
pub const COLLISION_SUFFIX: &str = "_right";

/// A category table with assay and patient columns attached.
#[derive(Debug, Clone)]
pub struct JoinedTable {
    pub category: Category,
    pub frame: DataFrame,
    /// Category rows with no matching assay and patient row.
    pub dropped_rows: usize,
}

/// Inner join `table` to `assay` on `report_id`.
///
/// Category row order is preserved; a category row matching several assay
/// rows is repeated once per match, in assay order. All assay columns except
/// the key are appended after the category columns.
pub fn join_on_report_id(
    category: Category,
    table: &DataFrame,
    assay: &DataFrame,
) -> Result<JoinedTable> {
    let dropped_rows = unmatched_rows(category, table, assay)?;
    if dropped_rows > 0 {
        warn!(
            table = category.table_name(),
            dropped_rows,
            "rows without a matching assay and patient record were dropped"
        );
    }

    let mut args = JoinArgs::new(JoinType::Inner);
    args.maintain_order = MaintainOrderJoin::LeftRight;
    args.suffix = Some(COLLISION_SUFFIX.into());
    let frame = table
        .join(assay, [REPORT_ID], [REPORT_ID], args, None)
        .with_context(|| format!("join {} with assay and patient data", category.table_name()))?;
    Ok(JoinedTable {
        category,
        frame,
        dropped_rows,
    })
}

/// Category rows whose `report_id` is null or absent from `assay`.
fn unmatched_rows(category: Category, table: &DataFrame, assay: &DataFrame) -> Result<usize> {
    let assay_ids: HashSet<&str> = assay
        .column(REPORT_ID)
        .and_then(|column| column.as_materialized_series().str())
        .context("assay and patient report_id column")?
        .into_iter()
        .flatten()
        .collect();
    let table_ids = table
        .column(REPORT_ID)
        .and_then(|column| column.as_materialized_series().str())
        .with_context(|| format!("{} report_id column", category.table_name()))?;
    Ok(table_ids
        .into_iter()
        .filter(|id| !id.is_some_and(|id| assay_ids.contains(id)))
        .count())
}

#[cfg(test)]
mod tests {
    use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};

    use super::*;

    fn frame(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
        let columns: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| Series::new(name.into(), values).into_column())
            .collect();
        DataFrame::new(columns).unwrap()
    }

    fn strings(frame: &DataFrame, column: &str) -> Vec<Option<String>> {
        let column = frame.column(column).unwrap();
        (0..frame.height())
            .map(|row| match column.get(row).unwrap() {
                AnyValue::Null => None,
                value => Some(value.str_value().into_owned()),
            })
            .collect()
    }

    #[test]
    fn test_attaches_assay_columns_in_table_order() {
        let table = frame(vec![
            ("report_id", vec![Some("B"), Some("A"), Some("B")]),
            ("gene", vec![Some("KRAS"), Some("EGFR"), Some("TP53")]),
        ]);
        let assay = frame(vec![
            ("report_id", vec![Some("A"), Some("B")]),
            ("mrn", vec![Some("1"), Some("2")]),
        ]);
        let joined = join_on_report_id(Category::ShortVariants, &table, &assay).unwrap();
        assert_eq!(joined.dropped_rows, 0);
        assert_eq!(
            joined.frame.get_column_names_str(),
            vec!["report_id", "gene", "mrn"]
        );
        assert_eq!(
            strings(&joined.frame, "mrn"),
            vec![Some("2".into()), Some("1".into()), Some("2".into())]
        );
    }

    #[test]
    fn test_mixed_matches_keep_table_order_and_single_key() {
        let table = frame(vec![
            ("report_id", vec![Some("B"), Some("A"), Some("B"), Some("Z")]),
            ("gene", vec![Some("KRAS"), Some("EGFR"), Some("TP53"), Some("ALK")]),
        ]);
        let assay = frame(vec![
            ("report_id", vec![Some("A"), Some("B")]),
            ("mrn", vec![Some("1"), Some("2")]),
        ]);
        let joined = join_on_report_id(Category::CopyNumberAlterations, &table, &assay).unwrap();
        assert_eq!(joined.dropped_rows, 1);
        assert_eq!(
            joined.frame.get_column_names_str(),
            vec!["report_id", "gene", "mrn"]
        );
        assert_eq!(
            strings(&joined.frame, "report_id"),
            vec![Some("B".into()), Some("A".into()), Some("B".into())]
        );
        assert_eq!(
            strings(&joined.frame, "gene"),
            vec![Some("KRAS".into()), Some("EGFR".into()), Some("TP53".into())]
        );
        assert_eq!(
            strings(&joined.frame, "mrn"),
            vec![Some("2".into()), Some("1".into()), Some("2".into())]
        );
    }

    #[test]
    fn test_unmatched_rows_are_dropped_and_counted() {
        let table = frame(vec![
            ("report_id", vec![Some("A"), Some("Z"), None]),
            ("gene", vec![Some("EGFR"), Some("ALK"), Some("RET")]),
        ]);
        let assay = frame(vec![("report_id", vec![Some("A")]), ("mrn", vec![Some("1")])]);
        let joined = join_on_report_id(Category::ShortVariants, &table, &assay).unwrap();
        assert_eq!(joined.frame.height(), 1);
        assert_eq!(joined.dropped_rows, 2);
        assert_eq!(strings(&joined.frame, "gene"), vec![Some("EGFR".into())]);
    }

    #[test]
    fn test_name_collisions_get_suffix() {
        let table = frame(vec![
            ("report_id", vec![Some("A")]),
            ("status", vec![Some("known")]),
        ]);
        let assay = frame(vec![
            ("report_id", vec![Some("A")]),
            ("status", vec![Some("final")]),
        ]);
        let joined = join_on_report_id(Category::Biomarkers, &table, &assay).unwrap();
        assert_eq!(
            joined.frame.get_column_names_str(),
            vec!["report_id", "status", "status_right"]
        );
    }

    #[test]
    fn test_duplicate_assay_ids_multiply_rows() {
        let table = frame(vec![("report_id", vec![Some("A")])]);
        let assay = frame(vec![
            ("report_id", vec![Some("A"), Some("A")]),
            ("mrn", vec![Some("1"), Some("2")]),
        ]);
        let joined = join_on_report_id(Category::Rearrangements, &table, &assay).unwrap();
        assert_eq!(
            strings(&joined.frame, "mrn"),
            vec![Some("1".into()), Some("2".into())]
        );
    }
}
