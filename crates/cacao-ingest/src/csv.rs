//! CSV reading and writing through Polars.

use std::fs::{self, File};
use std::path::Path;

use cacao_model::Table;
use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::frame::{frame_to_table, table_to_frame};

/// Trims a header, drops a byte-order mark and collapses inner whitespace
/// (including line breaks) to single spaces.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reads a CSV file into a table with every column as text.
///
/// Types are never inferred: the cleaning passes decide them. Empty fields
/// become missing cells and headers are normalized with [`normalize_header`].
pub fn read_csv_table(path: &Path) -> Result<Table> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let columns = frame_to_table(&df)?
        .into_columns()
        .into_iter()
        .map(|mut column| {
            column.name = normalize_header(&column.name);
            column
        })
        .collect();
    let table = Table::new(columns)?;
    debug!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "csv loaded"
    );
    Ok(table)
}

/// Writes a table as CSV with a header row, creating parent directories.
///
/// Missing cells are written as empty fields.
pub fn write_csv_table(table: &Table, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| IngestError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut df = table_to_frame(table)?;
    let mut file = File::create(path).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| IngestError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    debug!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "csv written"
    );
    Ok(())
}
