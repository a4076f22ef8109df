//! Control-character stripping.

use cacao_model::{PassKind, PassReport, Table};
use tracing::debug;
use unicode_general_category::{GeneralCategory, get_general_category};

use super::{CellEdit, rewrite_text_cells};

/// Whether `ch` belongs to the "Other" category group (control, format,
/// surrogate, private use, unassigned) and is not a line break or tab.
pub fn is_removable_control(ch: char) -> bool {
    if matches!(ch, '\n' | '\r' | '\t') {
        return false;
    }
    matches!(
        get_general_category(ch),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
    )
}

/// Removes "Other"-category code points from every non-blank text cell,
/// keeping `\n`, `\r` and `\t`.
pub fn strip_control_chars(table: &Table) -> (Table, PassReport) {
    let (cleaned, report) = rewrite_text_cells(table, PassKind::ControlChars, |value| {
        if !value.chars().any(is_removable_control) {
            return None;
        }
        let after: String = value.chars().filter(|&ch| !is_removable_control(ch)).collect();
        Some(CellEdit { after, note: None })
    });
    debug!(
        pass = %report.pass,
        columns = ?report.affected_columns(),
        changed = report.total_changed(),
        "control characters stripped"
    );
    (cleaned, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_controls_are_kept() {
        assert!(!is_removable_control('\n'));
        assert!(!is_removable_control('\r'));
        assert!(!is_removable_control('\t'));
    }

    #[test]
    fn other_category_removed() {
        assert!(is_removable_control('\u{0}'));
        assert!(is_removable_control('\u{7f}'));
        assert!(is_removable_control('\u{200b}'));
        assert!(is_removable_control('\u{e000}'));
        assert!(!is_removable_control('a'));
        assert!(!is_removable_control('é'));
        assert!(!is_removable_control(' '));
    }
}
