//! Encoding-problem detection and correction.

use cacao_model::{EncodingOptions, PassKind, PassReport, Table};
use tracing::debug;

use super::{CellEdit, rewrite_text_cells};

const REPLACEMENT_CHAR: char = '\u{fffd}';
const ESCAPE_MARKERS: [&str; 2] = ["\\x", "\\u"];

/// A problem found in one text value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingProblem {
    /// The value contains U+FFFD.
    ReplacementChar,
    /// The value contains a literal `\x` or `\u` escape.
    EscapeSequence,
    /// The value contains a known mis-encoded substring.
    Misencoded { wrong: String, correct: String },
}

impl std::fmt::Display for EncodingProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReplacementChar => f.write_str("replacement character"),
            Self::EscapeSequence => f.write_str("escape sequence"),
            Self::Misencoded { wrong, correct } => write!(f, "'{wrong}' -> '{correct}'"),
        }
    }
}

/// Lists the problems present in `value`, in detection order.
pub fn detect_encoding_problems(value: &str, options: &EncodingOptions) -> Vec<EncodingProblem> {
    let mut problems = Vec::new();
    if value.contains(REPLACEMENT_CHAR) {
        problems.push(EncodingProblem::ReplacementChar);
    }
    if ESCAPE_MARKERS.iter().any(|marker| value.contains(marker)) {
        problems.push(EncodingProblem::EscapeSequence);
    }
    for fix in &options.replacements {
        if !fix.wrong.is_empty() && value.contains(fix.wrong.as_str()) {
            problems.push(EncodingProblem::Misencoded {
                wrong: fix.wrong.clone(),
                correct: fix.correct.clone(),
            });
        }
    }
    problems
}

/// Builds the corrected form of `value`.
///
/// Replacement characters are removed first, then every mapping entry is
/// applied in declaration order, each one seeing the output of the previous.
fn suggest(value: &str, options: &EncodingOptions) -> String {
    let mut suggestion: String = value.chars().filter(|&ch| ch != REPLACEMENT_CHAR).collect();
    for fix in &options.replacements {
        if !fix.wrong.is_empty() && suggestion.contains(fix.wrong.as_str()) {
            suggestion = suggestion.replace(fix.wrong.as_str(), &fix.correct);
        }
    }
    suggestion
}

/// Detects encoding problems in every non-blank text cell and rewrites the
/// cells whose suggested correction differs from the original.
///
/// Cells with only an escape sequence are flagged in the report but kept.
pub fn fix_encoding_issues(table: &Table, options: &EncodingOptions) -> (Table, PassReport) {
    let (cleaned, report) = rewrite_text_cells(table, PassKind::Encoding, |value| {
        let problems = detect_encoding_problems(value, options);
        if problems.is_empty() {
            return None;
        }
        let note = problems
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Some(CellEdit {
            after: suggest(value, options),
            note: Some(note),
        })
    });
    debug!(
        pass = %report.pass,
        columns = ?report.affected_columns(),
        flagged = report.total_changed(),
        "encoding problems checked"
    );
    (cleaned, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cacao_model::EncodingFix;

    #[test]
    fn default_mapping_fixes_naive() {
        let options = EncodingOptions::default();
        assert_eq!(suggest("Nave", &options), "Naive");
        assert_eq!(suggest("Caf\u{c3}\u{a9}", &options), "Café");
        assert_eq!(suggest("Nve", &options), "Naive");
    }

    #[test]
    fn replacement_char_removed() {
        let options = EncodingOptions::default();
        assert_eq!(suggest("Ecu\u{fffd}ador", &options), "Ecuador");
    }

    #[test]
    fn later_entries_see_earlier_output() {
        let options = EncodingOptions {
            replacements: vec![EncodingFix::new("ab", "b"), EncodingFix::new("bb", "c")],
        };
        assert_eq!(suggest("abb", &options), "c");
    }

    #[test]
    fn detection_lists_every_problem() {
        let options = EncodingOptions::default();
        let problems = detect_encoding_problems("Nave\\x41\u{fffd}", &options);
        assert_eq!(
            problems,
            vec![
                EncodingProblem::ReplacementChar,
                EncodingProblem::EscapeSequence,
                EncodingProblem::Misencoded {
                    wrong: "Nave".to_string(),
                    correct: "Naive".to_string(),
                },
            ]
        );
    }
}
