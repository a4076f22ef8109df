//! In-memory tabular dataset with explicit cell variants.
//!
//! A [`Table`] is an ordered list of named [`Column`]s of equal length.
//! Cells are [`CellValue`]s, where a missing observation is its own variant
//! instead of a null-like sentinel. Passes never mutate a table they are
//! given; they build new columns and assemble a new table.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CleanError, Result};

/// Declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Integer,
    Float,
    Categorical,
    /// ISO `YYYY-MM-DD` text.
    Date,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Categorical => "categorical",
            Self::Date => "date",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single cell.
///
/// `PartialEq` is structural: two `Missing` cells compare equal so that whole
/// tables can be compared against snapshots. Use [`CellValue::value_eq`] for
/// the three-valued comparison in which a missing operand yields no answer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Integer(i64),
    /// Always finite; NaN is represented as `Missing`.
    Float(f64),
    #[default]
    Missing,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Builds a float cell, mapping NaN and infinities to `Missing`.
    pub fn float(value: f64) -> Self {
        if value.is_finite() {
            Self::Float(value)
        } else {
            Self::Missing
        }
    }

    pub fn from_f64_opt(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::float)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Returns the text payload of a `Text` cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the text payload when it is non-blank after trimming.
    ///
    /// This is the gate every string-cleaning pass uses: missing, numeric and
    /// blank cells pass through untouched.
    pub fn as_non_blank_str(&self) -> Option<&str> {
        self.as_str().filter(|value| !value.trim().is_empty())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Three-valued equality: `None` when either side is missing.
    pub fn value_eq(&self, other: &Self) -> Option<bool> {
        match (self, other) {
            (Self::Missing, _) | (_, Self::Missing) => None,
            (Self::Text(a), Self::Text(b)) => Some(a == b),
            (Self::Text(_), _) | (_, Self::Text(_)) => Some(false),
            (a, b) => Some(a.as_f64() == b.as_f64()),
        }
    }

    /// Hashable identity used for duplicate detection and distinct counts.
    pub fn key(&self) -> CellKey {
        match self {
            Self::Text(value) => CellKey::Text(value.clone()),
            Self::Integer(value) => CellKey::Integer(*value),
            // -0.0 and 0.0 are one value
            Self::Float(value) => CellKey::Float((value + 0.0).to_bits()),
            Self::Missing => CellKey::Missing,
        }
    }

    /// Total order used for tie-breaks: missing, then numbers by value, then
    /// text lexicographically.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        fn rank(cell: &CellValue) -> u8 {
            match cell {
                CellValue::Missing => 0,
                CellValue::Integer(_) | CellValue::Float(_) => 1,
                CellValue::Text(_) => 2,
            }
        }
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (a, b) if rank(a) == 1 && rank(b) == 1 => {
                let left = a.as_f64().unwrap_or_default();
                let right = b.as_f64().unwrap_or_default();
                left.total_cmp(&right)
            }
            (a, b) => rank(a).cmp(&rank(b)),
        }
    }

    /// Plain rendering used for persistence: missing renders as empty text.
    pub fn to_plain_string(&self) -> String {
        match self {
            Self::Missing => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Missing => f.write_str("NA"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::float(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Hashable projection of a [`CellValue`].
///
/// Missing cells share one key, so rows that are missing in the same places
/// count as duplicates of each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellKey {
    Text(String),
    Integer(i64),
    Float(u64),
    Missing,
}

/// A named, typed sequence of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnType,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnType, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Builds a text column; `None` entries become missing cells.
    pub fn text<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|value| value.map_or(CellValue::Missing, |v| CellValue::Text(v.into())))
            .collect();
        Self::new(name, ColumnType::Text, values)
    }

    pub fn floats<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let values = values.into_iter().map(CellValue::from_f64_opt).collect();
        Self::new(name, ColumnType::Float, values)
    }

    pub fn integers<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<i64>>,
    {
        let values = values.into_iter().map(CellValue::from).collect();
        Self::new(name, ColumnType::Integer, values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&CellValue> {
        self.values.get(row)
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|cell| cell.is_missing()).count()
    }

    /// Returns a column with the same name whose cells are `f` applied to
    /// every cell of `self`, in row order.
    pub fn map_cells<F>(&self, kind: ColumnType, f: F) -> Self
    where
        F: FnMut(&CellValue) -> CellValue,
    {
        Self::new(self.name.clone(), kind, self.values.iter().map(f).collect())
    }
}

/// An ordered collection of equally long, uniquely named columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Column>", into = "Vec<Column>")]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Builds a table, rejecting duplicate names and ragged columns.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let expected = columns.first().map_or(0, Column::len);
        for (idx, column) in columns.iter().enumerate() {
            if column.len() != expected {
                return Err(CleanError::RaggedColumn {
                    column: column.name.clone(),
                    expected,
                    actual: column.len(),
                });
            }
            if columns[..idx].iter().any(|other| other.name == column.name) {
                return Err(CleanError::DuplicateColumn {
                    column: column.name.clone(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Like [`Table::column`], but a missing column is an error.
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| CleanError::column_not_found(name))
    }

    /// Replaces the column with the same name in place, or appends it.
    pub fn set_column(&mut self, column: Column) -> Result<()> {
        let actual = column.len();
        if !self.columns.is_empty() && actual != self.height() {
            return Err(CleanError::RaggedColumn {
                column: column.name,
                expected: self.height(),
                actual,
            });
        }
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(slot) => *slot = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    /// Returns a copy of the table with `column` set.
    pub fn with_column(&self, column: Column) -> Result<Self> {
        let mut table = self.clone();
        table.set_column(column)?;
        Ok(table)
    }

    /// Returns a table whose named column holds `f(row, cell)` for every cell
    /// and is declared as `kind`, or `None` when the column is absent.
    pub fn map_column<F>(&self, name: &str, kind: ColumnType, mut f: F) -> Option<Self>
    where
        F: FnMut(usize, &CellValue) -> CellValue,
    {
        let idx = self.columns.iter().position(|c| c.name == name)?;
        let mut table = self.clone();
        let column = &self.columns[idx];
        table.columns[idx] = Column::new(
            column.name.clone(),
            kind,
            column
                .values
                .iter()
                .enumerate()
                .map(|(row, cell)| f(row, cell))
                .collect(),
        );
        Some(table)
    }

    /// Returns a table where every cell of every column is `f(column, row, cell)`.
    /// Declared types are kept.
    pub fn map_all<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Column, usize, &CellValue) -> CellValue,
    {
        let columns = self
            .columns
            .iter()
            .map(|column| {
                let values = column
                    .values
                    .iter()
                    .enumerate()
                    .map(|(row, cell)| f(column, row, cell))
                    .collect();
                Column::new(column.name.clone(), column.kind, values)
            })
            .collect();
        Self { columns }
    }

    /// Cells of one row in column order.
    pub fn row(&self, idx: usize) -> Option<Vec<&CellValue>> {
        if idx >= self.height() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[idx]).collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<&CellValue>> + '_ {
        (0..self.height()).filter_map(|idx| self.row(idx))
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}

impl TryFrom<Vec<Column>> for Table {
    type Error = CleanError;

    fn try_from(columns: Vec<Column>) -> Result<Self> {
        Self::new(columns)
    }
}

impl From<Table> for Vec<Column> {
    fn from(table: Table) -> Self {
        table.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_nan_becomes_missing() {
        assert_eq!(CellValue::float(f64::NAN), CellValue::Missing);
        assert_eq!(CellValue::float(f64::INFINITY), CellValue::Missing);
        assert_eq!(CellValue::float(3.5), CellValue::Float(3.5));
    }

    #[test]
    fn missing_has_no_value_equality() {
        assert_eq!(CellValue::Missing.value_eq(&CellValue::Missing), None);
        assert_eq!(CellValue::Missing.value_eq(&"a".into()), None);
        assert_eq!(CellValue::Integer(3).value_eq(&CellValue::Float(3.0)), Some(true));
        assert_eq!(CellValue::text("3").value_eq(&CellValue::Integer(3)), Some(false));
    }

    #[test]
    fn total_cmp_orders_numbers_before_text() {
        let mut cells = vec![
            CellValue::text("b"),
            CellValue::Float(2.5),
            CellValue::text("a"),
            CellValue::Integer(1),
        ];
        cells.sort_by(CellValue::total_cmp);
        assert_eq!(
            cells,
            vec![
                CellValue::Integer(1),
                CellValue::Float(2.5),
                CellValue::text("a"),
                CellValue::text("b"),
            ]
        );
    }

    #[test]
    fn negative_zero_shares_key() {
        assert_eq!(CellValue::Float(-0.0).key(), CellValue::Float(0.0).key());
    }
}
