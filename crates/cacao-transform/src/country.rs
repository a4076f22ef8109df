//! Country-name uniformization.

use cacao_model::{CellValue, ChangeExample, ColumnChange, CountryOptions, PassKind, PassReport, Table};
use tracing::{debug, warn};

use crate::format::title_case;

/// Uniform spelling of one country value.
///
/// The value is trimmed first; exceptions are then kept as written and
/// everything else is title-cased.
pub fn uniform_country(value: &str, options: &CountryOptions) -> String {
    let trimmed = value.trim();
    if options.is_exception(trimmed) {
        return trimmed.to_string();
    }
    title_case(trimmed)
}

/// Trims and title-cases country names in the configured columns, keeping
/// exception spellings such as `U.S.A.` verbatim.
///
/// Exceptions are matched case-sensitively, so `"uk"` becomes `"Uk"`.
/// Absent columns are skipped with a notice.
pub fn uniformize_countries(table: &Table, options: &CountryOptions) -> (Table, PassReport) {
    let mut report = PassReport::new(PassKind::Countries);
    let mut current = table.clone();
    for name in &options.columns {
        let Some(kind) = current.column(name).map(|column| column.kind) else {
            warn!(column = %name, "country column not found");
            report.skipped_column(name);
            continue;
        };
        let mut change = ColumnChange::new(name.as_str());
        if let Some(next) = current.map_column(name, kind, |row, cell| {
            let Some(value) = cell.as_non_blank_str() else {
                return cell.clone();
            };
            let uniform = uniform_country(value, options);
            if uniform == value {
                return cell.clone();
            }
            change.record(ChangeExample::new(row, value, uniform.as_str()));
            CellValue::Text(uniform)
        }) {
            current = next;
        }
        report.push_column(change);
    }
    debug!(
        pass = %report.pass,
        columns = ?report.affected_columns(),
        changed = report.total_changed(),
        "country names uniformized"
    );
    (current, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exceptions_kept() {
        let options = CountryOptions::default();
        assert_eq!(uniform_country("U.S.A.", &options), "U.S.A.");
        assert_eq!(uniform_country(" UK ", &options), "UK");
        assert_eq!(uniform_country("uk", &options), "Uk");
        assert_eq!(uniform_country("new zealand", &options), "New Zealand");
    }
}
