//! Column type casting and numeric coercion.

use cacao_model::{
    CastMode, CellValue, ChangeExample, CleanError, Column, ColumnChange, ColumnType, PassKind,
    PassReport, Result, Table,
};
use tracing::debug;

use crate::convert::{is_placeholder, safe_float, safe_float_cell};
use crate::format::date_cell;

/// Largest float magnitude that converts to `i64` without loss of range.
const I64_LIMIT: f64 = 9_223_372_036_854_775_807.0;

/// Converts one cell to `target`; `None` when the value does not fit.
///
/// Missing cells and blank text stay missing in every target.
fn cast_cell(cell: &CellValue, target: ColumnType) -> Option<CellValue> {
    if let CellValue::Text(value) = cell
        && is_placeholder(value)
    {
        return Some(CellValue::Missing);
    }
    match (target, cell) {
        (_, CellValue::Missing) => Some(CellValue::Missing),
        (ColumnType::Integer, CellValue::Integer(_)) => Some(cell.clone()),
        (ColumnType::Integer, CellValue::Float(value)) => integral(*value),
        (ColumnType::Integer, CellValue::Text(value)) => {
            let trimmed = value.trim();
            match trimmed.parse::<i64>() {
                Ok(parsed) => Some(CellValue::Integer(parsed)),
                Err(_) => integral(safe_float(trimmed)?),
            }
        }
        (ColumnType::Float, CellValue::Text(value)) => safe_float(value).map(CellValue::Float),
        (ColumnType::Float, other) => Some(safe_float_cell(other)),
        (ColumnType::Text | ColumnType::Categorical, CellValue::Text(_)) => Some(cell.clone()),
        (ColumnType::Text | ColumnType::Categorical, other) => Some(CellValue::Text(other.to_string())),
        (ColumnType::Date, other) => date_cell(other),
    }
}

fn integral(value: f64) -> Option<CellValue> {
    (value.is_finite() && value.fract() == 0.0 && value.abs() < I64_LIMIT)
        .then(|| CellValue::Integer(value as i64))
}

/// Casts each named column to `target`.
///
/// Every name is checked before anything is converted: one absent column
/// fails the whole call with [`CleanError::ColumnNotFound`]. In
/// [`CastMode::Strict`] the first value that does not fit fails the call with
/// [`CleanError::CastFailed`]; in [`CastMode::Coerce`] it becomes missing and
/// is counted in the report.
pub fn cast_columns<S: AsRef<str>>(
    table: &Table,
    columns: &[S],
    target: ColumnType,
    mode: CastMode,
) -> Result<(Table, PassReport)> {
    for name in columns {
        table.require_column(name.as_ref())?;
    }
    let mut report = PassReport::new(PassKind::Cast);
    let mut current = table.clone();
    for name in columns {
        let column = current.require_column(name.as_ref())?;
        let mut change = ColumnChange::new(column.name.as_str());
        let mut values = Vec::with_capacity(column.len());
        for (row, cell) in column.values.iter().enumerate() {
            match cast_cell(cell, target) {
                Some(converted) => {
                    if converted != *cell {
                        change.tally();
                    }
                    values.push(converted);
                }
                None if mode == CastMode::Strict => {
                    return Err(CleanError::CastFailed {
                        column: column.name.clone(),
                        row,
                        value: cell.to_string(),
                        target,
                    });
                }
                None => {
                    change.record_missing(ChangeExample::new(row, cell.to_string(), "NA"));
                    values.push(CellValue::Missing);
                }
            }
        }
        let cast = Column::new(column.name.clone(), target, values);
        current.set_column(cast)?;
        report.push_column(change);
    }
    debug!(
        pass = %report.pass,
        target = %target,
        columns = ?report.affected_columns(),
        missing_introduced = report.total_missing_introduced(),
        "columns cast"
    );
    Ok((current, report))
}

/// Applies the safe float converter to every cell of one column.
///
/// Text that does not parse becomes missing and is counted; the column is
/// declared `Float` afterwards.
pub fn coerce_numeric(table: &Table, column: &str) -> Result<(Table, PassReport)> {
    table.require_column(column)?;
    let mut report = PassReport::new(PassKind::NumericCoercion);
    let mut change = ColumnChange::new(column);
    let coerced = table
        .map_column(column, ColumnType::Float, |row, cell| {
            let converted = safe_float_cell(cell);
            match cell {
                CellValue::Text(value) if converted.is_missing() && !is_placeholder(value) => {
                    change.record_missing(ChangeExample::new(row, value.as_str(), "NA"));
                }
                _ if converted != *cell => change.tally(),
                _ => {}
            }
            converted
        })
        .ok_or_else(|| CleanError::column_not_found(column))?;
    report.push_column(change);
    debug!(
        pass = %report.pass,
        column,
        converted = report.total_changed(),
        missing_introduced = report.total_missing_introduced(),
        "column coerced to float"
    );
    Ok((coerced, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_accepts_integral_floats() {
        assert_eq!(
            cast_cell(&CellValue::text("12.0"), ColumnType::Integer),
            Some(CellValue::Integer(12))
        );
        assert_eq!(
            cast_cell(&CellValue::Float(7.0), ColumnType::Integer),
            Some(CellValue::Integer(7))
        );
        assert_eq!(cast_cell(&CellValue::text("12.5"), ColumnType::Integer), None);
        assert_eq!(cast_cell(&CellValue::text("abc"), ColumnType::Integer), None);
    }

    #[test]
    fn missing_and_blank_stay_missing() {
        for target in [ColumnType::Integer, ColumnType::Float, ColumnType::Categorical] {
            assert_eq!(cast_cell(&CellValue::Missing, target), Some(CellValue::Missing));
            assert_eq!(cast_cell(&CellValue::text(" "), target), Some(CellValue::Missing));
        }
    }

    #[test]
    fn categorical_renders_numbers() {
        assert_eq!(
            cast_cell(&CellValue::Integer(5), ColumnType::Categorical),
            Some(CellValue::text("5"))
        );
    }
}
