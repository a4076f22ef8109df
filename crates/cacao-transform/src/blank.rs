//! Blank-cell standardization.

use cacao_model::{CellValue, ChangeExample, ColumnChange, PassKind, PassReport, Table};
use tracing::debug;

use crate::changes::current_change;
use crate::convert::is_placeholder;

/// Turns empty, whitespace-only and `&nbsp;` text cells into missing cells.
///
/// Numeric and already-missing cells are untouched.
pub fn standardize_blank_cells(table: &Table) -> (Table, PassReport) {
    let mut report = PassReport::new(PassKind::BlankCells);
    let mut changes: Vec<ColumnChange> = Vec::new();
    let cleaned = table.map_all(|column, row, cell| {
        let change = current_change(&mut changes, &column.name);
        match cell {
            CellValue::Text(value) if is_placeholder(value) => {
                change.record(ChangeExample::new(
                    row,
                    value.escape_debug().to_string(),
                    CellValue::Missing.to_string(),
                ));
                CellValue::Missing
            }
            other => other.clone(),
        }
    });
    for change in changes {
        report.push_column(change);
    }
    debug!(
        pass = %report.pass,
        changed = report.total_changed(),
        "blank cells standardized"
    );
    (cleaned, report)
}
