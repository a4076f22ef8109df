//! Conversion between [`Table`] and Polars DataFrames.

use cacao_model::{CellValue, Column as TableColumn, ColumnType, Table};
use polars::prelude::*;

use crate::error::Result;

/// Builds a table from a DataFrame.
///
/// Integer columns become `Integer`, float columns `Float` (NaN as missing),
/// and every other dtype is read as text. Nulls become missing cells.
pub fn frame_to_table(df: &DataFrame) -> Result<Table> {
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let series = column.as_materialized_series();
        let dtype = series.dtype();
        let (kind, values): (ColumnType, Vec<CellValue>) = if dtype.is_integer() {
            let cast = series.cast(&DataType::Int64)?;
            let values = cast.i64()?.into_iter().map(CellValue::from).collect();
            (ColumnType::Integer, values)
        } else if dtype.is_float() {
            let cast = series.cast(&DataType::Float64)?;
            let values = cast
                .f64()?
                .into_iter()
                .map(CellValue::from_f64_opt)
                .collect();
            (ColumnType::Float, values)
        } else {
            let cast = series.cast(&DataType::String)?;
            let values = cast
                .str()?
                .into_iter()
                .map(|value| value.map_or(CellValue::Missing, CellValue::text))
                .collect();
            (ColumnType::Text, values)
        };
        columns.push(TableColumn::new(column.name().to_string(), kind, values));
    }
    Ok(Table::new(columns)?)
}

/// Builds a DataFrame from a table, one series per column.
pub fn table_to_frame(table: &Table) -> Result<DataFrame> {
    let columns = table
        .columns()
        .iter()
        .map(|column| Column::from(column_to_series(column)))
        .collect::<Vec<_>>();
    Ok(DataFrame::new(columns)?)
}

fn column_to_series(column: &TableColumn) -> Series {
    let name = PlSmallStr::from(column.name.as_str());
    let observed = || column.values.iter().filter(|cell| !cell.is_missing());
    match column.kind {
        ColumnType::Integer if observed().all(|cell| matches!(cell, CellValue::Integer(_))) => {
            let values: Vec<Option<i64>> = column
                .values
                .iter()
                .map(|cell| match cell {
                    CellValue::Integer(value) => Some(*value),
                    _ => None,
                })
                .collect();
            Series::new(name, values)
        }
        ColumnType::Integer | ColumnType::Float
            if observed().all(|cell| cell.as_f64().is_some()) =>
        {
            let values: Vec<Option<f64>> = column.values.iter().map(CellValue::as_f64).collect();
            Series::new(name, values)
        }
        _ => {
            let values: Vec<Option<String>> = column
                .values
                .iter()
                .map(|cell| (!cell.is_missing()).then(|| cell.to_string()))
                .collect();
            Series::new(name, values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_columns_round_trip() {
        let table = Table::new(vec![
            TableColumn::text("Company", [Some("Bonnat"), None]),
            TableColumn::integers("REF", [Some(1876), None]),
            TableColumn::floats("Rating", [Some(3.5), Some(2.75)]),
        ])
        .unwrap();
        let df = table_to_frame(&table).unwrap();
        assert_eq!(df.shape(), (2, 3));
        assert_eq!(frame_to_table(&df).unwrap(), table);
    }

    #[test]
    fn mixed_numeric_column_written_as_text() {
        let table = Table::new(vec![TableColumn::new(
            "Rating",
            ColumnType::Float,
            vec![CellValue::Float(3.0), CellValue::text("Unknown")],
        )])
        .unwrap();
        let df = table_to_frame(&table).unwrap();
        let back = frame_to_table(&df).unwrap();
        assert_eq!(
            back.column("Rating").unwrap().values,
            vec![CellValue::text("3.0"), CellValue::text("Unknown")]
        );
    }
}
