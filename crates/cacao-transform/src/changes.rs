//! Bookkeeping shared by passes that walk every column.

use cacao_model::ColumnChange;

/// Returns the change entry for `column`, opening a new one when the
/// column-ordered walk moves on to the next column.
pub(crate) fn current_change<'a>(
    changes: &'a mut Vec<ColumnChange>,
    column: &str,
) -> &'a mut ColumnChange {
    if changes.last().is_none_or(|change| change.column != column) {
        changes.push(ColumnChange::new(column));
    }
    let last = changes.len() - 1;
    &mut changes[last]
}
