//! Tests for CSV loading and snapshot persistence.

use std::io::Write;

use cacao_ingest::{IngestError, Snapshot, read_csv_table, save_snapshot, write_csv_table};
use cacao_model::{CellValue, Column, ColumnType, Table};
use tempfile::{NamedTempFile, TempDir};

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[test]
fn reads_every_column_as_text() {
    let file = create_temp_csv("Company,REF,Rating,Cocoa Percent\nBonnat,1876,3.5,70%\nAmedei,,4,\n");
    let table = read_csv_table(file.path()).unwrap();

    assert_eq!(table.column_names(), vec!["Company", "REF", "Rating", "Cocoa Percent"]);
    assert_eq!(table.height(), 2);
    for column in table.columns() {
        assert_eq!(column.kind, ColumnType::Text);
    }
    assert_eq!(
        table.column("REF").unwrap().values,
        vec![CellValue::text("1876"), CellValue::Missing]
    );
    assert_eq!(
        table.column("Cocoa Percent").unwrap().values,
        vec![CellValue::text("70%"), CellValue::Missing]
    );
}

#[test]
fn headers_are_normalized_on_read() {
    let file = create_temp_csv("\u{feff}Company,  Bean   Type \nBonnat,Criollo\n");
    let table = read_csv_table(file.path()).unwrap();
    assert_eq!(table.column_names(), vec!["Company", "Bean Type"]);
}

#[test]
fn missing_file_reported() {
    let dir = TempDir::new().unwrap();
    let err = read_csv_table(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn written_csv_reads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("out.csv");
    let table = Table::new(vec![
        Column::text("Company", [Some("Bonnat"), None]),
        Column::floats("Rating", [Some(3.5), None]),
    ])
    .unwrap();
    write_csv_table(&table, &path).unwrap();

    let back = read_csv_table(&path).unwrap();
    assert_eq!(
        back.column("Company").unwrap().values,
        vec![CellValue::text("Bonnat"), CellValue::Missing]
    );
    assert_eq!(
        back.column("Rating").unwrap().values,
        vec![CellValue::text("3.5"), CellValue::Missing]
    );
}

#[test]
fn snapshots_land_in_their_directories() {
    let dir = TempDir::new().unwrap();
    let table = Table::new(vec![Column::text("Company", [Some("Bonnat")])]).unwrap();
    for snapshot in Snapshot::ALL {
        let path = save_snapshot(&table, snapshot, dir.path()).unwrap();
        assert!(path.is_file());
        assert_eq!(path, snapshot.path(dir.path()));
    }
    assert!(dir.path().join("raw/cacao_raw.csv").is_file());
    assert!(dir.path().join("interim/cacao_interim.csv").is_file());
    assert!(dir.path().join("processed/cacao_clean.csv").is_file());
}

#[test]
fn empty_snapshot_refused() {
    let dir = TempDir::new().unwrap();
    let table = Table::new(vec![Column::text("Company", Vec::<Option<&str>>::new())]).unwrap();
    let err = save_snapshot(&table, Snapshot::Processed, dir.path()).unwrap_err();
    assert!(matches!(err, IngestError::EmptyTable { snapshot: "processed" }));
    assert!(!Snapshot::Processed.path(dir.path()).exists());
}
