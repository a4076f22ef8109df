//! Filling missing cells by column mode or a sentinel label, and applying a
//! full set of decisions to a table.

use cacao_model::{
    CellValue, ChangeExample, CleanError, ColumnChange, ColumnType, ImputationOptions,
    ImputationStrategy, PassKind, PassReport, Result, Table,
};
use tracing::debug;

use super::decision::{ImputationDecision, analyze_column};

/// Replaces every missing cell of `column` with `fill`.
fn fill_missing(
    table: &Table,
    column: &str,
    fill: &CellValue,
    note: &str,
) -> Result<(Table, ColumnChange)> {
    let source = table.require_column(column)?;
    let kind = match fill {
        CellValue::Text(_) if source.kind.is_numeric() => ColumnType::Text,
        _ => source.kind,
    };
    let mut change = ColumnChange::new(column);
    let filled = table
        .map_column(column, kind, |row, cell| {
            if cell.is_missing() {
                change.record(ChangeExample::new(row, "NA", fill.to_string()).with_note(note));
                fill.clone()
            } else {
                cell.clone()
            }
        })
        .ok_or_else(|| CleanError::column_not_found(column))?;
    Ok((filled, change))
}

/// Fills the missing cells of `column` with its most frequent value.
///
/// A table with no rows is returned unchanged.
///
/// # Errors
///
/// [`CleanError::ColumnNotFound`] when the column is absent and
/// [`CleanError::ImputationUndefined`] when every cell is missing.
pub fn impute_with_mode(table: &Table, column: &str) -> Result<(Table, PassReport)> {
    let source = table.require_column(column)?;
    let mut report = PassReport::new(PassKind::Imputation);
    if table.is_empty() {
        return Ok((table.clone(), report));
    }
    let mode = analyze_column(source)
        .mode
        .ok_or_else(|| CleanError::ImputationUndefined {
            column: column.to_string(),
        })?;
    let (filled, change) = fill_missing(table, column, &mode, ImputationStrategy::Mode.as_str())?;
    debug!(column, mode = %mode, filled = change.changed, "missing values filled with mode");
    report.push_column(change);
    Ok((filled, report))
}

/// Fills the missing cells of `column` with `label`.
///
/// # Errors
///
/// [`CleanError::ColumnNotFound`] when the column is absent.
pub fn impute_with_sentinel(table: &Table, column: &str, label: &str) -> Result<(Table, PassReport)> {
    let mut report = PassReport::new(PassKind::Imputation);
    let (filled, change) = fill_missing(table, column, &CellValue::text(label), "sentinel label")?;
    debug!(column, label, filled = change.changed, "missing values filled with label");
    report.push_column(change);
    Ok((filled, report))
}

/// Applies the effective strategy of each decision in order.
///
/// Sentinel strategies take their label from `options`. The returned report
/// merges the columns filled by every decision.
pub fn apply_decisions(
    table: &Table,
    decisions: &[ImputationDecision],
    options: &ImputationOptions,
) -> Result<(Table, PassReport)> {
    let mut report = PassReport::new(PassKind::Imputation);
    let mut current = table.clone();
    for decision in decisions {
        let strategy = decision.effective_strategy();
        let (next, step) = match options.label_for(strategy) {
            Some(label) => impute_with_sentinel(&current, decision.column(), label)?,
            None => impute_with_mode(&current, decision.column())?,
        };
        for change in step.columns {
            report.push_column(change);
        }
        current = next;
    }
    Ok((current, report))
}
