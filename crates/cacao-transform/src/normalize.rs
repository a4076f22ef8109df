//! Min-max scaling.

use cacao_model::{
    CellValue, ChangeExample, CleanError, ColumnChange, ColumnType, PassKind, PassReport, Result,
    Table,
};
use tracing::debug;

use crate::convert::is_placeholder;

/// Rescales the numeric cells of `column` to `(v - min) / (max - min)`.
///
/// Missing cells and blank text stay missing. A table with no rows is
/// returned unchanged.
///
/// # Errors
///
/// - [`CleanError::ColumnNotFound`] when the column is absent
/// - [`CleanError::NonNumeric`] when a non-blank text cell is present
/// - [`CleanError::EmptyInput`] when the column holds no numeric value
/// - [`CleanError::DegenerateRange`] when every numeric value is equal
pub fn normalize_min_max(table: &Table, column: &str) -> Result<(Table, PassReport)> {
    let source = table.require_column(column)?;
    let mut report = PassReport::new(PassKind::MinMax);
    if table.is_empty() {
        return Ok((table.clone(), report));
    }

    let mut bounds: Option<(f64, f64)> = None;
    for (row, cell) in source.values.iter().enumerate() {
        if let CellValue::Text(value) = cell
            && !is_placeholder(value)
        {
            return Err(CleanError::NonNumeric {
                column: column.to_string(),
                row,
                value: value.clone(),
            });
        }
        if let Some(v) = cell.as_f64() {
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(v), max.max(v)),
                None => (v, v),
            });
        }
    }
    let (min, max) =
        bounds.ok_or_else(|| CleanError::empty_input(format!("min-max normalization of '{column}'")))?;
    let range = max - min;
    if range == 0.0 {
        return Err(CleanError::DegenerateRange {
            column: column.to_string(),
            value: min,
        });
    }

    let mut change = ColumnChange::new(column);
    let scaled = table
        .map_column(column, ColumnType::Float, |row, cell| match cell.as_f64() {
            Some(v) => {
                let after = CellValue::float((v - min) / range);
                change.record(ChangeExample::new(row, cell.to_string(), after.to_string()));
                after
            }
            None => CellValue::Missing,
        })
        .ok_or_else(|| CleanError::column_not_found(column))?;
    report.push_column(change);
    debug!(column, min, max, "column rescaled to [0, 1]");
    Ok((scaled, report))
}
