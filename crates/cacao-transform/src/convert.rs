//! Safe text-to-number conversion.

use cacao_model::CellValue;

/// HTML entity left behind by the scraper in empty table cells.
const NBSP_ENTITY: &str = "&nbsp;";

/// Returns true for empty, whitespace-only and placeholder tokens.
///
/// `str::trim` already covers U+00A0, so a run of non-breaking spaces is blank.
pub fn is_placeholder(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NBSP_ENTITY)
}

/// Parses a raw token as a float, returning `None` instead of failing.
///
/// Surrounding whitespace is ignored. Placeholders, unparseable text and
/// non-finite results (`"inf"`, `"NaN"`) all yield `None`.
pub fn safe_float(text: &str) -> Option<f64> {
    if is_placeholder(text) {
        return None;
    }
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Cell-level form of [`safe_float`]: numbers become floats, text is parsed.
pub fn safe_float_cell(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::Text(text) => CellValue::from_f64_opt(safe_float(text)),
        CellValue::Integer(value) => CellValue::float(*value as f64),
        CellValue::Float(value) => CellValue::float(*value),
        CellValue::Missing => CellValue::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(safe_float("3.5"), Some(3.5));
        assert_eq!(safe_float("  2.75 "), Some(2.75));
        assert_eq!(safe_float("-1"), Some(-1.0));
        assert_eq!(safe_float("1e2"), Some(100.0));
    }

    #[test]
    fn placeholders_are_missing() {
        assert_eq!(safe_float(""), None);
        assert_eq!(safe_float("   "), None);
        assert_eq!(safe_float("&nbsp;"), None);
        assert_eq!(safe_float("\u{a0}"), None);
        assert_eq!(safe_float("\u{a0}\u{a0}"), None);
    }

    #[test]
    fn garbage_and_non_finite_are_missing() {
        assert_eq!(safe_float("abc"), None);
        assert_eq!(safe_float("3,5"), None);
        assert_eq!(safe_float("inf"), None);
        assert_eq!(safe_float("NaN"), None);
    }

    #[test]
    fn cell_conversion() {
        assert_eq!(safe_float_cell(&CellValue::text("4")), CellValue::Float(4.0));
        assert_eq!(safe_float_cell(&CellValue::Integer(2)), CellValue::Float(2.0));
        assert_eq!(safe_float_cell(&CellValue::text("x")), CellValue::Missing);
        assert_eq!(safe_float_cell(&CellValue::Missing), CellValue::Missing);
    }
}
