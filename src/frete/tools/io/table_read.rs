use std::path::Path;

use calamine::{DataType, Range, Reader, open_workbook_auto};
use tracing::{debug, instrument, warn};

use crate::frete::tools::error::{Result, ToolError};
use crate::frete::tools::io::{TabularFormat, tabular_format};
use crate::frete::tools::model::{Table, Value, parse_number};

/// Loads a table from a workbook (first worksheet) or a CSV file, depending
/// on the file extension.
#[instrument(level = "debug", fields(path = %path.display()))]
pub fn read_table(path: &Path) -> Result<Table> {
    let table = match tabular_format(path)? {
        TabularFormat::Workbook => read_workbook(path)?,
        TabularFormat::Csv => read_csv(path)?,
    };
    debug!(
        columns = table.column_count(),
        rows = table.len(),
        "table loaded"
    );
    Ok(table)
}

fn read_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("no worksheet in {}", path.display())))?
        .map_err(ToolError::from)?;
    Ok(range_to_table(&range))
}

/// Converts a used range into a table.
///
/// The range begins at the first used cell, so empty leading worksheet
/// columns are restored as `Unnamed: <i>` columns holding missing values and
/// positional rules keep addressing worksheet columns.
fn range_to_table(range: &Range<DataType>) -> Table {
    let leading = range.start().map_or(0, |(_, col)| col as usize);
    let mut rows = range.rows();
    let columns: Vec<String> = match rows.next() {
        Some(header) => (0..leading)
            .map(|index| format!("Unnamed: {index}"))
            .chain(
                header
                    .iter()
                    .enumerate()
                    .map(|(index, cell)| header_label(leading + index, cell)),
            )
            .collect(),
        None => return Table::default(),
    };

    let mut table = Table::new(columns);
    for row in rows {
        let values = std::iter::repeat_n(Value::Missing, leading)
            .chain(row.iter().map(cell_to_value))
            .collect();
        table.push_row(values);
    }
    table
}

fn header_label(index: usize, cell: &DataType) -> String {
    match cell_to_value(cell) {
        Value::Missing => format!("Unnamed: {index}"),
        value => value.to_string(),
    }
}

fn cell_to_value(cell: &DataType) -> Value {
    match cell {
        DataType::String(value) => Value::Text(value.clone()),
        DataType::Float(value) => Value::Number(*value),
        DataType::Int(value) => Value::Number(*value as f64),
        DataType::Bool(value) => Value::Boolean(*value),
        DataType::DateTime(value) => Value::DateTime(*value),
        DataType::Empty | DataType::Error(_) => Value::Missing,
        other => Value::Text(other.to_string()),
    }
}

fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let columns = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(index, label)| {
            if label.is_empty() {
                format!("Unnamed: {index}")
            } else {
                label.to_string()
            }
        })
        .collect();

    let mut table = Table::new(columns);
    for (row_idx, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() > table.column_count() {
            warn!(
                path = %path.display(),
                row = row_idx + 2,
                fields = record.len(),
                columns = table.column_count(),
                "record wider than header; trailing fields dropped"
            );
        }
        table.push_row(record.iter().map(field_to_value).collect());
    }
    Ok(table)
}

fn field_to_value(field: &str) -> Value {
    if field.is_empty() {
        return Value::Missing;
    }
    match parse_number(field) {
        Some(number) => Value::Number(number),
        None => Value::Text(field.to_string()),
    }
}
