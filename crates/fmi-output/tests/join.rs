use std::collections::BTreeSet;

use fmi_model::Category;
use fmi_output::join_on_report_id;
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use proptest::prelude::*;

fn frame(ids: &[String], extra: (&str, Vec<String>)) -> DataFrame {
    let columns: Vec<Column> = vec![
        Series::new("report_id".into(), ids.to_vec()).into_column(),
        Series::new(extra.0.into(), extra.1).into_column(),
    ];
    DataFrame::new(columns).expect("frame")
}

proptest! {
    #[test]
    fn unique_matches_are_neither_duplicated_nor_lost(
        assay_ids in prop::collection::btree_set("[A-E]", 0..5),
        table_ids in prop::collection::vec("[A-H]", 0..20),
    ) {
        let assay_ids: Vec<String> = assay_ids.into_iter().collect();
        let mrns = assay_ids.iter().map(|id| format!("mrn-{id}")).collect();
        let assay = frame(&assay_ids, ("mrn", mrns));
        let genes = (0..table_ids.len()).map(|i| format!("g{i}")).collect();
        let table = frame(&table_ids, ("gene", genes));

        let known: BTreeSet<&String> = assay_ids.iter().collect();
        let expected: Vec<&String> = table_ids.iter().filter(|id| known.contains(id)).collect();

        let joined = join_on_report_id(Category::ShortVariants, &table, &assay).expect("join");
        prop_assert_eq!(joined.frame.height(), expected.len());
        prop_assert_eq!(joined.dropped_rows, table_ids.len() - expected.len());

        let ids = joined.frame.column("report_id").expect("ids").as_materialized_series().str().expect("str").clone();
        let mrns = joined.frame.column("mrn").expect("mrn").as_materialized_series().str().expect("str").clone();
        for (row, id) in expected.iter().enumerate() {
            prop_assert_eq!(ids.get(row), Some(id.as_str()));
            let expected_mrn = format!("mrn-{id}");
            prop_assert_eq!(mrns.get(row), Some(expected_mrn.as_str()));
        }
    }
}
