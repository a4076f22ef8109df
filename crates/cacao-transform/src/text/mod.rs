//! Per-cell string cleaners.
//!
//! All three passes visit every column and only touch text cells that are
//! non-blank after trimming. Missing, numeric and blank cells pass through.

mod control;
mod encoding;
mod special;

pub use control::{is_removable_control, strip_control_chars};
pub use encoding::{EncodingProblem, detect_encoding_problems, fix_encoding_issues};
pub use special::{strip_edge_special_chars, strip_edges};

use cacao_model::{CellValue, ChangeExample, ColumnChange, PassKind, PassReport, Table};

use crate::changes::current_change;

/// Outcome of a text cleaner for one cell.
pub(crate) struct CellEdit {
    /// Replacement text; equal to the input for cells that are only flagged.
    pub after: String,
    pub note: Option<String>,
}

/// Runs `edit` over every non-blank text cell and assembles the report.
///
/// Cells for which `edit` returns `None` are kept as they are. Examples are
/// stored with control characters escaped so reports stay printable.
pub(crate) fn rewrite_text_cells<F>(table: &Table, pass: PassKind, mut edit: F) -> (Table, PassReport)
where
    F: FnMut(&str) -> Option<CellEdit>,
{
    let mut changes: Vec<ColumnChange> = Vec::new();
    let cleaned = table.map_all(|column, row, cell| {
        let change = current_change(&mut changes, &column.name);
        let Some(value) = cell.as_non_blank_str() else {
            return cell.clone();
        };
        let Some(CellEdit { after, note }) = edit(value) else {
            return cell.clone();
        };
        let mut example = ChangeExample::new(
            row,
            value.escape_debug().to_string(),
            after.escape_debug().to_string(),
        );
        if let Some(note) = note {
            example = example.with_note(note);
        }
        change.record(example);
        CellValue::Text(after)
    });

    let mut report = PassReport::new(pass);
    for change in changes {
        report.push_column(change);
    }
    (cleaned, report)
}
