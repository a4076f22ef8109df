//! Tests for the per-cell text cleaners.

use cacao_model::{
    CellValue, Column, EncodingOptions, PassKind, SpecialCharOptions, Table,
};
use cacao_transform::{
    fix_encoding_issues, standardize_blank_cells, strip_control_chars, strip_edge_special_chars,
};

fn text_table(name: &str, values: &[Option<&str>]) -> Table {
    Table::new(vec![Column::text(name, values.iter().copied())]).unwrap()
}

fn cells(table: &Table, name: &str) -> Vec<CellValue> {
    table.column(name).unwrap().values.clone()
}

#[test]
fn blank_cells_become_missing() {
    let table = text_table("Bean Type", &[Some("Criollo"), Some("  "), Some("\u{a0}"), Some("&nbsp;"), None]);
    let (cleaned, report) = standardize_blank_cells(&table);
    assert_eq!(
        cells(&cleaned, "Bean Type"),
        vec![
            CellValue::text("Criollo"),
            CellValue::Missing,
            CellValue::Missing,
            CellValue::Missing,
            CellValue::Missing,
        ]
    );
    assert_eq!(report.pass, PassKind::BlankCells);
    assert_eq!(report.total_changed(), 3);
}

#[test]
fn control_chars_removed_except_whitespace_controls() {
    let table = text_table(
        "Company",
        &[Some("A\u{0}B\u{7}"), Some("keep\nline\tand\rreturn"), None, Some("  ")],
    );
    let (cleaned, report) = strip_control_chars(&table);
    assert_eq!(
        cells(&cleaned, "Company"),
        vec![
            CellValue::text("AB"),
            CellValue::text("keep\nline\tand\rreturn"),
            CellValue::Missing,
            CellValue::text("  "),
        ]
    );
    assert_eq!(report.affected_columns(), vec!["Company"]);
    assert_eq!(report.total_changed(), 1);
}

#[test]
fn control_chars_clean_table_reports_nothing() {
    let table = text_table("Company", &[Some("Bonnat"), Some("Amedei")]);
    let (cleaned, report) = strip_control_chars(&table);
    assert_eq!(cleaned, table);
    assert!(report.is_clean());
    assert_eq!(report.to_string(), "control characters: nothing to change");
}

#[test]
fn control_chars_skip_numeric_columns() {
    let table = Table::new(vec![
        Column::floats("Rating", [Some(3.5), None]),
        Column::text("Company", [Some("x\u{1b}"), Some("y")]),
    ])
    .unwrap();
    let (cleaned, report) = strip_control_chars(&table);
    assert_eq!(cleaned.column("Rating"), table.column("Rating"));
    assert_eq!(cells(&cleaned, "Company")[0], CellValue::text("x"));
    assert_eq!(report.affected_columns(), vec!["Company"]);
}

#[test]
fn edge_special_chars_trimmed() {
    let table = text_table(
        "Broad Bean Origin",
        &[Some("**Venezuela++"), Some("mid*dle"), Some("  Peru  "), Some("#Ghana!"), None],
    );
    let (cleaned, report) = strip_edge_special_chars(&table, &SpecialCharOptions::default());
    assert_eq!(
        cells(&cleaned, "Broad Bean Origin"),
        vec![
            CellValue::text("Venezuela"),
            CellValue::text("mid*dle"),
            CellValue::text("  Peru  "),
            CellValue::text("Ghana"),
            CellValue::Missing,
        ]
    );
    insta::assert_snapshot!(report.to_string(), @r"
    edge special characters: Broad Bean Origin
      Broad Bean Origin: 2 changed
        - row 0: '**Venezuela++' -> 'Venezuela' (start: **, end: ++)
        - row 3: '#Ghana!' -> 'Ghana' (start: #, end: !)
    ");
}

#[test]
fn edge_special_chars_examples_capped() {
    let values: Vec<Option<&str>> = vec![Some("#a"); 5];
    let table = text_table("Company", &values);
    let (_, report) = strip_edge_special_chars(&table, &SpecialCharOptions::default());
    let change = report.column("Company").unwrap();
    assert_eq!(change.changed, 5);
    assert_eq!(change.examples.len(), 3);
    assert!(report.to_string().ends_with("- ... and 2 more"));
}

#[test]
fn edge_special_chars_custom_set() {
    let table = text_table("Company", &[Some("**x**"), Some("-y-")]);
    let options = SpecialCharOptions::default().with_target_chars(['-']);
    let (cleaned, _) = strip_edge_special_chars(&table, &options);
    assert_eq!(
        cells(&cleaned, "Company"),
        vec![CellValue::text("**x**"), CellValue::text("y")]
    );
}

#[test]
fn encoding_fixes_known_problems() {
    let table = text_table(
        "Specific Bean Origin or Bar Name",
        &[
            Some("Nave"),
            Some("Ecu\u{fffd}ador"),
            Some("Caf\u{c3}\u{a9} noir"),
            Some("Madagascar"),
            Some("raw \\x41 bytes"),
        ],
    );
    let (cleaned, report) = fix_encoding_issues(&table, &EncodingOptions::default());
    assert_eq!(
        cells(&cleaned, "Specific Bean Origin or Bar Name"),
        vec![
            CellValue::text("Naive"),
            CellValue::text("Ecuador"),
            CellValue::text("Café noir"),
            CellValue::text("Madagascar"),
            CellValue::text("raw \\x41 bytes"),
        ]
    );
    let change = report.column("Specific Bean Origin or Bar Name").unwrap();
    assert_eq!(change.changed, 4);
    assert_eq!(
        change.examples[0].note.as_deref(),
        Some("'Nave' -> 'Naive'")
    );
    assert_eq!(
        change.examples[1].note.as_deref(),
        Some("replacement character")
    );
}

#[test]
fn encoding_applies_several_mappings_to_one_cell() {
    let table = text_table("Company", &[Some("Nve Ã¨ Ã§")]);
    let (cleaned, _) = fix_encoding_issues(&table, &EncodingOptions::default());
    assert_eq!(cells(&cleaned, "Company"), vec![CellValue::text("Naive è ç")]);
}

#[test]
fn cleaners_leave_input_untouched() {
    let table = text_table("Company", &[Some("**Nave\u{0}**"), None]);
    let snapshot = table.clone();
    let _ = strip_control_chars(&table);
    let _ = strip_edge_special_chars(&table, &SpecialCharOptions::default());
    let _ = fix_encoding_issues(&table, &EncodingOptions::default());
    let _ = standardize_blank_cells(&table);
    assert_eq!(table, snapshot);
}
