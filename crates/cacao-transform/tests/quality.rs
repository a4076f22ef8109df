//! Tests for quality checks and min-max normalization.

use cacao_model::{CellValue, CleanError, Column, ColumnType, Table};
use cacao_transform::{QualitySummary, count_duplicates, count_missing, normalize_min_max};

#[test]
fn duplicate_rows_counted() {
    let table = Table::new(vec![
        Column::text("Company", [Some("A"), Some("A"), Some("B")]),
        Column::floats("Rating", [Some(3.0), Some(3.0), Some(3.0)]),
    ])
    .unwrap();
    assert_eq!(count_duplicates(&table), 1);
}

#[test]
fn rows_differing_in_one_column_are_distinct() {
    let table = Table::new(vec![
        Column::text("Company", [Some("A"), Some("A"), Some("A")]),
        Column::floats("Rating", [Some(3.0), Some(3.5), None]),
    ])
    .unwrap();
    assert_eq!(count_duplicates(&table), 0);
}

#[test]
fn missing_counts_per_column() {
    let table = Table::new(vec![
        Column::text("Company", [Some("A"), None, None]),
        Column::floats("Rating", [Some(3.0), Some(2.0), None]),
    ])
    .unwrap();
    assert_eq!(
        count_missing(&table),
        vec![("Company".to_string(), 2), ("Rating".to_string(), 1)]
    );
}

#[test]
fn missing_counts_follow_column_order() {
    let table = Table::new(vec![
        Column::floats("Rating", [None, Some(2.0)]),
        Column::text("Company", [Some("A"), Some("B")]),
        Column::text("Bean Type", [None::<&str>, None]),
    ])
    .unwrap();
    let summary = QualitySummary::of(&table);
    let names: Vec<&str> = summary.missing.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["Rating", "Company", "Bean Type"]);
    assert_eq!(summary.missing_in("Bean Type"), Some(2));
    assert_eq!(summary.missing_in("Company"), Some(0));
    assert_eq!(summary.missing_in("REF"), None);
    assert_eq!(summary.total_missing(), 3);
}

#[test]
fn missing_counts_empty_table() {
    let table = Table::new(vec![Column::text("Company", Vec::<Option<&str>>::new())]).unwrap();
    assert!(count_missing(&table).is_empty());
    assert_eq!(count_duplicates(&table), 0);
    assert!(count_missing(&Table::default()).is_empty());
}

#[test]
fn quality_summary_totals() {
    let table = Table::new(vec![Column::text("Company", [Some("A"), Some("A"), None])]).unwrap();
    let summary = QualitySummary::of(&table);
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.columns, 1);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.total_missing(), 1);
}

#[test]
fn min_max_scales_to_unit_range() {
    let table = Table::new(vec![Column::integers("REF", [Some(10), Some(20), Some(30), None])]).unwrap();
    let (scaled, report) = normalize_min_max(&table, "REF").unwrap();
    let column = scaled.column("REF").unwrap();
    assert_eq!(column.kind, ColumnType::Float);
    assert_eq!(
        column.values,
        vec![
            CellValue::Float(0.0),
            CellValue::Float(0.5),
            CellValue::Float(1.0),
            CellValue::Missing,
        ]
    );
    assert_eq!(report.total_changed(), 3);
}

#[test]
fn min_max_constant_column_is_degenerate() {
    let table = Table::new(vec![Column::floats("Rating", [Some(3.0), Some(3.0)])]).unwrap();
    assert_eq!(
        normalize_min_max(&table, "Rating").unwrap_err(),
        CleanError::DegenerateRange {
            column: "Rating".to_string(),
            value: 3.0,
        }
    );
}

#[test]
fn min_max_rejects_text_and_empty_columns() {
    let table = Table::new(vec![
        Column::text("Company", [Some("A"), None]),
        Column::floats("Rating", [None, None]),
    ])
    .unwrap();
    assert_eq!(
        normalize_min_max(&table, "Company").unwrap_err(),
        CleanError::NonNumeric {
            column: "Company".to_string(),
            row: 0,
            value: "A".to_string(),
        }
    );
    assert!(matches!(
        normalize_min_max(&table, "Rating"),
        Err(CleanError::EmptyInput { .. })
    ));
    assert_eq!(
        normalize_min_max(&table, "REF").unwrap_err(),
        CleanError::column_not_found("REF")
    );
}
