//! Per-column missingness statistics and the threshold rule that picks a
//! fill strategy for each column.

use std::collections::BTreeMap;
use std::fmt;

use cacao_model::{
    CellKey, CellValue, CleanError, Column, ImputationOptions, ImputationStrategy, Result, Table,
};
use serde::Serialize;
use tracing::{debug, warn};

/// Missingness statistics of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingnessReport {
    pub column: String,
    pub total: usize,
    pub missing_count: usize,
    /// `missing_count / total`; zero for an empty column.
    pub proportion_missing: f64,
    pub distinct_count: usize,
    /// Most frequent observed value; `None` when every cell is missing.
    pub mode: Option<CellValue>,
}

/// Why a strategy was recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rationale {
    /// Missing share above the drop threshold; mode filling would bias the distribution.
    HighMissingness,
    /// Missing share at or below the mode threshold; the mode is a safe fill.
    LowMissingness,
    /// Intermediate missing share with many categories; mode filling would skew it.
    IntermediateMissingness,
}

impl Rationale {
    pub fn description(self) -> &'static str {
        match self {
            Self::HighMissingness => "high missing rate: filling with the mode would bias the distribution",
            Self::LowMissingness => "low missing rate: the most frequent value is a safe fill",
            Self::IntermediateMissingness => {
                "intermediate missing rate with many categories: the mode would skew the distribution"
            }
        }
    }
}

impl fmt::Display for Rationale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Recommended strategy for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImputationDecision {
    pub report: MissingnessReport,
    /// Strategy chosen by the decision rule.
    pub strategy: ImputationStrategy,
    pub rationale: Rationale,
    /// Strategy forced by configuration, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_strategy: Option<ImputationStrategy>,
}

impl ImputationDecision {
    pub fn column(&self) -> &str {
        &self.report.column
    }

    /// Strategy to apply: the override when present, the advice otherwise.
    pub fn effective_strategy(&self) -> ImputationStrategy {
        self.override_strategy.unwrap_or(self.strategy)
    }
}

/// Decisions for the analyzed columns plus the names that were not found.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MissingnessAnalysis {
    pub decisions: Vec<ImputationDecision>,
    pub skipped: Vec<String>,
}

impl MissingnessAnalysis {
    pub fn decision(&self, column: &str) -> Option<&ImputationDecision> {
        self.decisions.iter().find(|d| d.column() == column)
    }
}

/// Computes missing share, distinct count and mode of a column.
///
/// Ties for the mode go to the smallest value: numbers before text, numbers
/// by value, text lexicographically.
pub fn analyze_column(column: &Column) -> MissingnessReport {
    let total = column.len();
    let missing_count = column.missing_count();
    let mut counts: BTreeMap<CellKey, (usize, &CellValue)> = BTreeMap::new();
    for cell in column.values.iter().filter(|cell| !cell.is_missing()) {
        counts.entry(cell.key()).or_insert((0, cell)).0 += 1;
    }
    let mode = counts
        .values()
        .max_by(|(count_a, a), (count_b, b)| count_a.cmp(count_b).then_with(|| b.total_cmp(a)))
        .map(|(_, cell)| (*cell).clone());
    let proportion_missing = if total == 0 {
        0.0
    } else {
        missing_count as f64 / total as f64
    };
    MissingnessReport {
        column: column.name.clone(),
        total,
        missing_count,
        proportion_missing,
        distinct_count: counts.len(),
        mode,
    }
}

/// Applies the three-way decision rule to a report.
///
/// Evaluated in order: above `drop_threshold` gives the sentinel, at or
/// below `mode_threshold` gives the mode, anything between gives the sentinel.
pub fn decide(
    report: &MissingnessReport,
    options: &ImputationOptions,
) -> (ImputationStrategy, Rationale) {
    let proportion = report.proportion_missing;
    if proportion > options.drop_threshold {
        (ImputationStrategy::Sentinel, Rationale::HighMissingness)
    } else if proportion <= options.mode_threshold {
        (ImputationStrategy::Mode, Rationale::LowMissingness)
    } else {
        (ImputationStrategy::Sentinel, Rationale::IntermediateMissingness)
    }
}

/// Analyzes the configured columns and recommends a strategy for each.
///
/// Advisory only: the table is not modified. Configured overrides are
/// attached to the matching decisions. Columns that are absent are listed
/// in [`MissingnessAnalysis::skipped`].
///
/// # Errors
///
/// [`CleanError::EmptyInput`] on a table with no rows, and
/// [`CleanError::InvalidConfig`] when the thresholds are out of range or
/// inverted.
pub fn analyze_missingness(
    table: &Table,
    options: &ImputationOptions,
) -> Result<MissingnessAnalysis> {
    options.validate()?;
    if table.is_empty() {
        return Err(CleanError::empty_input("missingness analysis"));
    }
    let mut analysis = MissingnessAnalysis::default();
    for name in &options.columns {
        let Some(column) = table.column(name) else {
            warn!(column = %name, "imputation column not found, skipped");
            analysis.skipped.push(name.clone());
            continue;
        };
        let report = analyze_column(column);
        let (strategy, rationale) = decide(&report, options);
        debug!(
            column = %name,
            proportion_missing = report.proportion_missing,
            distinct = report.distinct_count,
            strategy = %strategy,
            "imputation strategy decided"
        );
        analysis.decisions.push(ImputationDecision {
            report,
            strategy,
            rationale,
            override_strategy: options.overrides.get(name).copied(),
        });
    }
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_tie_prefers_smallest() {
        let column = Column::text("c", [Some("b"), Some("a"), Some("b"), Some("a"), None]);
        let report = analyze_column(&column);
        assert_eq!(report.mode, Some(CellValue::text("a")));
        assert_eq!(report.distinct_count, 2);
        assert_eq!(report.missing_count, 1);
    }

    #[test]
    fn all_missing_has_no_mode() {
        let column = Column::text("c", [None::<&str>, None]);
        let report = analyze_column(&column);
        assert_eq!(report.mode, None);
        assert_eq!(report.proportion_missing, 1.0);
    }

    #[test]
    fn thresholds_are_inclusive_for_mode() {
        let options = ImputationOptions::default();
        let report = |proportion_missing| MissingnessReport {
            column: "c".to_string(),
            total: 10,
            missing_count: 0,
            proportion_missing,
            distinct_count: 3,
            mode: None,
        };
        assert_eq!(decide(&report(0.1), &options).0, ImputationStrategy::Mode);
        assert_eq!(
            decide(&report(0.5), &options),
            (ImputationStrategy::Sentinel, Rationale::IntermediateMissingness)
        );
        assert_eq!(
            decide(&report(0.51), &options),
            (ImputationStrategy::Sentinel, Rationale::HighMissingness)
        );
    }
}
