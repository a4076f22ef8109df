//! Format normalization: percentages, review dates and title case.
//!
//! Each sub-operation targets named columns. A target column that is absent
//! is skipped with a notice in the report; it never fails the call.

use cacao_model::{
    CellValue, ChangeExample, ColumnChange, ColumnType, FormatOptions, PassKind, PassReport, Table,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::convert::{is_placeholder, safe_float};

/// Converts `"70%"`-style text cells of the percent column to floats.
///
/// The `%` sign is removed and surrounding whitespace trimmed before parsing.
/// Values that still fail to parse become missing and are counted.
pub fn percent_to_float(table: &Table, options: &FormatOptions) -> (Table, PassReport) {
    let mut report = PassReport::new(PassKind::PercentToFloat);
    let name = options.percent_column.as_str();
    let mut change = ColumnChange::new(name);
    let Some(converted) = table.map_column(name, ColumnType::Float, |row, cell| match cell {
        CellValue::Text(value) => {
            let stripped = value.replace('%', "");
            match safe_float(&stripped) {
                Some(parsed) => {
                    change.tally();
                    CellValue::Float(parsed)
                }
                None if is_placeholder(&stripped) => {
                    change.tally();
                    CellValue::Missing
                }
                None => {
                    change.record_missing(ChangeExample::new(row, value.as_str(), "NA"));
                    CellValue::Missing
                }
            }
        }
        CellValue::Integer(value) => CellValue::float(*value as f64),
        other => other.clone(),
    }) else {
        warn!(column = name, "percent column not found");
        report.skipped_column(name);
        return (table.clone(), report);
    };
    report.push_column(change);
    debug!(
        pass = %report.pass,
        column = name,
        converted = report.total_changed(),
        missing_introduced = report.total_missing_introduced(),
        "percent column converted"
    );
    (converted, report)
}

/// Parses a date written in one of the common forms.
///
/// A bare year maps to January 1st and a year-month to the first of the
/// month. Date-times keep only their date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_parse_date(trimmed)
        .or_else(|| try_parse_datetime(trimmed).map(|dt| dt.date()))
        .or_else(|| try_parse_partial(trimmed))
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%d-%b-%Y",  // 15-Jan-2016
        "%d-%B-%Y",  // 15-January-2016
        "%m/%d/%Y",  // US: 01/15/2016, ambiguous slash dates read month-first
        "%d/%m/%Y",  // European: 15/01/2016
        "%d.%m.%Y",  // 15.01.2016
        "%Y%m%d",    // Compact: 20160115
        "%b %d, %Y", // Jan 15, 2016
        "%B %d, %Y", // January 15, 2016
        "%d %b %Y",  // 15 Jan 2016
        "%d %B %Y",  // 15 January 2016
        "%d-%m-%Y",  // 15-01-2016
    ];
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Year-month and bare-year forms, completed to the first day.
fn try_parse_partial(value: &str) -> Option<NaiveDate> {
    if value.len() == 4 && value.chars().all(|ch| ch.is_ascii_digit()) {
        let year = value.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    let month_formats = ["%Y-%m", "%Y/%m", "%m/%Y", "%b %Y", "%B %Y"];
    month_formats.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(&format!("{value} 01"), &format!("{fmt} %d"))
            .ok()
            .and_then(|d| NaiveDate::from_ymd_opt(d.year(), d.month(), 1))
    })
}

/// Formats a date as ISO `YYYY-MM-DD`.
pub fn to_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Cell-level date conversion; `None` means the value could not be parsed.
pub(crate) fn date_cell(cell: &CellValue) -> Option<CellValue> {
    let date = match cell {
        CellValue::Missing => return Some(CellValue::Missing),
        CellValue::Text(value) if is_placeholder(value) => return Some(CellValue::Missing),
        CellValue::Text(value) => parse_date(value)?,
        CellValue::Integer(year) => NaiveDate::from_ymd_opt(i32::try_from(*year).ok()?, 1, 1)?,
        CellValue::Float(year) if year.fract() == 0.0 => {
            NaiveDate::from_ymd_opt(i32::try_from(*year as i64).ok()?, 1, 1)?
        }
        CellValue::Float(_) => return None,
    };
    Some(CellValue::Text(to_iso_date(date)))
}

/// Rewrites the date column to ISO `YYYY-MM-DD` text.
///
/// Unparseable values become missing and are counted.
pub fn normalize_dates(table: &Table, options: &FormatOptions) -> (Table, PassReport) {
    let mut report = PassReport::new(PassKind::Dates);
    let name = options.date_column.as_str();
    let mut change = ColumnChange::new(name);
    let Some(converted) = table.map_column(name, ColumnType::Date, |row, cell| {
        match date_cell(cell) {
            Some(converted) => {
                if converted != *cell {
                    change.tally();
                }
                converted
            }
            None => {
                change.record_missing(ChangeExample::new(row, cell.to_string(), "NA"));
                CellValue::Missing
            }
        }
    }) else {
        warn!(column = name, "date column not found");
        report.skipped_column(name);
        return (table.clone(), report);
    };
    report.push_column(change);
    debug!(
        pass = %report.pass,
        column = name,
        converted = report.total_changed(),
        missing_introduced = report.total_missing_introduced(),
        "date column normalized"
    );
    (converted, report)
}

/// Capitalizes the first letter of each whitespace-delimited word and
/// lowercases the rest; words are rejoined with single spaces.
pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            let mut cased = String::with_capacity(word.len());
            if let Some(first) = chars.next() {
                cased.push(capitalize(first));
            }
            cased.extend(chars.flat_map(char::to_lowercase));
            cased
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Single-character uppercase of `ch`; characters whose uppercase form
/// expands (`ß` -> `SS`) are kept as they are.
fn capitalize(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

/// Title-cases every non-blank text cell of the configured columns.
pub fn title_case_columns(table: &Table, options: &FormatOptions) -> (Table, PassReport) {
    let mut report = PassReport::new(PassKind::TitleCase);
    let mut current = table.clone();
    for name in &options.title_case_columns {
        let mut change = ColumnChange::new(name.as_str());
        let kind = match current.column(name) {
            Some(column) => column.kind,
            None => {
                warn!(column = %name, "title-case column not found");
                report.skipped_column(name);
                continue;
            }
        };
        if let Some(next) = current.map_column(name, kind, |row, cell| {
            let Some(value) = cell.as_non_blank_str() else {
                return cell.clone();
            };
            let cased = title_case(value);
            if cased == value {
                return cell.clone();
            }
            change.record(ChangeExample::new(row, value, cased.as_str()));
            CellValue::Text(cased)
        }) {
            current = next;
        }
        report.push_column(change);
    }
    debug!(
        pass = %report.pass,
        columns = ?report.affected_columns(),
        changed = report.total_changed(),
        "title case applied"
    );
    (current, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("new zealand"), "New Zealand");
        assert_eq!(title_case("  SAO   tome "), "Sao Tome");
        assert_eq!(title_case("criollo, trinitario"), "Criollo, Trinitario");
        assert_eq!(title_case("élan"), "Élan");
        assert_eq!(title_case("ßaum"), "ßaum");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn partial_dates_complete_to_first_day() {
        assert_eq!(parse_date("2016"), NaiveDate::from_ymd_opt(2016, 1, 1));
        assert_eq!(parse_date("2016-07"), NaiveDate::from_ymd_opt(2016, 7, 1));
        assert_eq!(parse_date("Jul 2016"), NaiveDate::from_ymd_opt(2016, 7, 1));
    }

    #[test]
    fn full_dates() {
        assert_eq!(parse_date("2016-07-14"), NaiveDate::from_ymd_opt(2016, 7, 14));
        assert_eq!(parse_date("14.07.2016"), NaiveDate::from_ymd_opt(2016, 7, 14));
        assert_eq!(parse_date("July 14, 2016"), NaiveDate::from_ymd_opt(2016, 7, 14));
        assert_eq!(
            parse_date("2016-07-14T10:30:00"),
            NaiveDate::from_ymd_opt(2016, 7, 14)
        );
    }

    #[test]
    fn slash_dates_month_first() {
        assert_eq!(parse_date("01/02/2016"), NaiveDate::from_ymd_opt(2016, 1, 2));
        assert_eq!(parse_date("12/31/2016"), NaiveDate::from_ymd_opt(2016, 12, 31));
        assert_eq!(parse_date("15/01/2016"), NaiveDate::from_ymd_opt(2016, 1, 15));
    }

    #[test]
    fn invalid_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date("2016-13-01"), None);
    }

    #[test]
    fn numeric_years() {
        assert_eq!(
            date_cell(&CellValue::Integer(2015)),
            Some(CellValue::text("2015-01-01"))
        );
        assert_eq!(date_cell(&CellValue::Float(2015.5)), None);
    }
}
