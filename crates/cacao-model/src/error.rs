//! Error types for table construction and cleaning passes.

use thiserror::Error;

use crate::table::ColumnType;

/// Structural errors raised by table operations and cleaning passes.
///
/// Value-level parse failures are never represented here: passes degrade
/// them to [`CellValue::Missing`](crate::CellValue::Missing) and record the
/// count in their report instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CleanError {
    /// A column required by the operation is absent from the table.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// Mode imputation was requested on a column with no observed value.
    #[error("mode is undefined for column '{column}': every value is missing")]
    ImputationUndefined { column: String },

    /// Min-max normalization on a column whose minimum equals its maximum.
    #[error("column '{column}' is constant ({value}); min-max range is zero")]
    DegenerateRange { column: String, value: f64 },

    /// The operation needs at least one row (or one observed value).
    #[error("{operation} requires non-empty input")]
    EmptyInput { operation: String },

    /// A strict cast met a value that cannot be represented in the target type.
    #[error("cannot cast '{value}' in column '{column}' (row {row}) to {target}")]
    CastFailed {
        column: String,
        row: usize,
        value: String,
        target: ColumnType,
    },

    /// A numeric operation met a text value.
    #[error("column '{column}' holds non-numeric value '{value}' at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    /// Two columns with the same name were given to a table.
    #[error("duplicate column name '{column}'")]
    DuplicateColumn { column: String },

    /// Options that cannot drive a pass (for example inverted thresholds).
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A column length does not match the table row count.
    #[error("column '{column}' has {actual} values, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },
}

impl CleanError {
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    pub fn empty_input(operation: impl Into<String>) -> Self {
        Self::EmptyInput {
            operation: operation.into(),
        }
    }
}

/// Result type for table and cleaning operations.
pub type Result<T> = std::result::Result<T, CleanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CleanError::column_not_found("Bean Type");
        assert_eq!(err.to_string(), "column 'Bean Type' not found");
    }

    #[test]
    fn test_cast_failed_display() {
        let err = CleanError::CastFailed {
            column: "REF".to_string(),
            row: 4,
            value: "abc".to_string(),
            target: ColumnType::Integer,
        };
        assert_eq!(
            err.to_string(),
            "cannot cast 'abc' in column 'REF' (row 4) to integer"
        );
    }
}
