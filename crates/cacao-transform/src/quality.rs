//! Read-only quality diagnostics.

use std::collections::HashSet;

use cacao_model::{CellKey, Table};
use serde::Serialize;

/// Number of rows that exactly repeat an earlier row across all columns.
///
/// Missing cells compare equal to each other here, so two rows missing in
/// the same places are duplicates.
pub fn count_duplicates(table: &Table) -> usize {
    let mut seen: HashSet<Vec<CellKey>> = HashSet::with_capacity(table.height());
    table
        .rows()
        .filter(|row| !seen.insert(row.iter().map(|cell| cell.key()).collect()))
        .count()
}

/// Missing-cell count per column, in table column order; empty for a
/// table with no rows.
pub fn count_missing(table: &Table) -> Vec<(String, usize)> {
    if table.is_empty() {
        return Vec::new();
    }
    table
        .columns()
        .iter()
        .map(|column| (column.name.clone(), column.missing_count()))
        .collect()
}

/// Quality figures of one table snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualitySummary {
    pub rows: usize,
    pub columns: usize,
    pub duplicates: usize,
    pub missing: Vec<(String, usize)>,
}

impl QualitySummary {
    pub fn of(table: &Table) -> Self {
        Self {
            rows: table.height(),
            columns: table.width(),
            duplicates: count_duplicates(table),
            missing: count_missing(table),
        }
    }

    pub fn total_missing(&self) -> usize {
        self.missing.iter().map(|(_, count)| count).sum()
    }

    pub fn missing_in(&self, column: &str) -> Option<usize> {
        self.missing
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, count)| *count)
    }
}
