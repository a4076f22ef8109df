//! Diagnostic reports returned alongside transformed tables.
//!
//! Passes never print. Each one returns a [`PassReport`] describing which
//! columns it touched, how many cells changed, and the first few examples
//! in row order. Callers decide how (and whether) to render it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of examples kept per affected column.
pub const MAX_EXAMPLES: usize = 3;

/// Identifies the pass that produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    BlankCells,
    ControlChars,
    EdgeSpecialChars,
    Encoding,
    PercentToFloat,
    Dates,
    TitleCase,
    Countries,
    NumericCoercion,
    Cast,
    Imputation,
    MinMax,
}

impl PassKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::BlankCells => "blank cells",
            Self::ControlChars => "control characters",
            Self::EdgeSpecialChars => "edge special characters",
            Self::Encoding => "encoding problems",
            Self::PercentToFloat => "percent to float",
            Self::Dates => "date normalization",
            Self::TitleCase => "title case",
            Self::Countries => "country names",
            Self::NumericCoercion => "numeric coercion",
            Self::Cast => "type cast",
            Self::Imputation => "imputation",
            Self::MinMax => "min-max normalization",
        }
    }
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One illustrative change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeExample {
    pub row: usize,
    pub before: String,
    pub after: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ChangeExample {
    pub fn new(row: usize, before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            row,
            before: before.into(),
            after: after.into(),
            note: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl fmt::Display for ChangeExample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: '{}' -> '{}'", self.row, self.before, self.after)?;
        if let Some(note) = &self.note {
            write!(f, " ({note})")?;
        }
        Ok(())
    }
}

/// What a pass did to one column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnChange {
    pub column: String,
    /// Cells rewritten (or, for detectors, cells flagged).
    pub changed: usize,
    /// Cells that became missing because a value failed to parse.
    pub missing_introduced: usize,
    pub examples: Vec<ChangeExample>,
}

impl ColumnChange {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ..Self::default()
        }
    }

    /// Counts a change and keeps it as an example while fewer than
    /// [`MAX_EXAMPLES`] are held.
    pub fn record(&mut self, example: ChangeExample) {
        self.changed += 1;
        self.push_example(example);
    }

    /// Counts a change without keeping an example.
    pub fn tally(&mut self) {
        self.changed += 1;
    }

    /// Counts a value that degraded to missing.
    pub fn record_missing(&mut self, example: ChangeExample) {
        self.missing_introduced += 1;
        self.push_example(example);
    }

    fn push_example(&mut self, example: ChangeExample) {
        if self.examples.len() < MAX_EXAMPLES {
            self.examples.push(example);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changed == 0 && self.missing_introduced == 0
    }
}

/// Diagnostics of a single pass over a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    pub pass: PassKind,
    /// Only columns where something happened, in table column order.
    pub columns: Vec<ColumnChange>,
    /// Non-fatal notices such as skipped columns.
    pub notices: Vec<String>,
}

impl PassReport {
    pub fn new(pass: PassKind) -> Self {
        Self {
            pass,
            columns: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Appends a column entry if it recorded anything.
    pub fn push_column(&mut self, change: ColumnChange) {
        if !change.is_empty() {
            self.columns.push(change);
        }
    }

    pub fn notice(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
    }

    /// Records that a listed column was absent and skipped.
    pub fn skipped_column(&mut self, column: &str) {
        self.notice(format!("column '{column}' not found, skipped"));
    }

    pub fn affected_columns(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.column.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnChange> {
        self.columns.iter().find(|c| c.column == name)
    }

    pub fn total_changed(&self) -> usize {
        self.columns.iter().map(|c| c.changed).sum()
    }

    pub fn total_missing_introduced(&self) -> usize {
        self.columns.iter().map(|c| c.missing_introduced).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.columns.is_empty()
    }
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            write!(f, "{}: nothing to change", self.pass)?;
        } else {
            write!(f, "{}: {}", self.pass, self.affected_columns().join(", "))?;
            for change in &self.columns {
                write!(f, "\n  {}: {} changed", change.column, change.changed)?;
                if change.missing_introduced > 0 {
                    write!(f, ", {} now missing", change.missing_introduced)?;
                }
                for example in &change.examples {
                    write!(f, "\n    - {example}")?;
                }
                let shown = change.examples.len();
                let total = change.changed + change.missing_introduced;
                if total > shown {
                    write!(f, "\n    - ... and {} more", total - shown)?;
                }
            }
        }
        for notice in &self.notices {
            write!(f, "\n  note: {notice}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn examples_capped_at_three() {
        let mut change = ColumnChange::new("Company");
        for row in 0..5 {
            change.record(ChangeExample::new(row, "a", "b"));
        }
        assert_eq!(change.changed, 5);
        assert_eq!(change.examples.len(), MAX_EXAMPLES);
        assert_eq!(change.examples[2].row, 2);
    }

    #[test]
    fn empty_changes_not_pushed() {
        let mut report = PassReport::new(PassKind::ControlChars);
        report.push_column(ColumnChange::new("Company"));
        assert!(report.is_clean());
    }
}
