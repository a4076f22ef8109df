//! Edge special-character trimming.

use cacao_model::{PassKind, PassReport, SpecialCharOptions, Table};
use tracing::debug;

use super::{CellEdit, rewrite_text_cells};

/// Strips target characters from both ends of the whitespace-trimmed value.
///
/// The leading run is removed before the trailing run. Whitespace enclosed by
/// the stripped run counts as part of it, so `"* #x"` becomes `"x"` and a
/// second application changes nothing. Interior characters are never touched.
pub fn strip_edges<'a>(value: &'a str, options: &SpecialCharOptions) -> &'a str {
    split_edges(value.trim(), options).1
}

/// Splits a trimmed value into its leading run, core and trailing run.
fn split_edges<'a>(trimmed: &'a str, options: &SpecialCharOptions) -> (&'a str, &'a str, &'a str) {
    let is_edge = |ch: char| options.is_target(ch) || ch.is_whitespace();
    let rest = trimmed.trim_start_matches(is_edge);
    let start = &trimmed[..trimmed.len() - rest.len()];
    let core = rest.trim_end_matches(is_edge);
    (start, core, &rest[core.len()..])
}

/// Removes target characters found at the start and end of text cells.
///
/// A cell is rewritten only when an edge character was removed; surrounding
/// whitespace alone is left as it is.
pub fn strip_edge_special_chars(table: &Table, options: &SpecialCharOptions) -> (Table, PassReport) {
    let (cleaned, report) = rewrite_text_cells(table, PassKind::EdgeSpecialChars, |value| {
        let (start, core, end) = split_edges(value.trim(), options);
        if start.is_empty() && end.is_empty() {
            return None;
        }
        Some(CellEdit {
            after: core.to_string(),
            note: Some(removed_note(start.trim(), end.trim())),
        })
    });
    debug!(
        pass = %report.pass,
        columns = ?report.affected_columns(),
        changed = report.total_changed(),
        "edge special characters stripped"
    );
    (cleaned, report)
}

/// Describes the removed runs, e.g. `start: **, end: ++`.
fn removed_note(start: &str, end: &str) -> String {
    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("start: {start}, end: {end}"),
        (false, true) => format!("start: {start}"),
        _ => format!("end: {end}"),
    }
}
