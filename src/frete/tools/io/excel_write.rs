use std::path::Path;

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};

use crate::frete::tools::derive::{COMBINED_DOCUMENT_FIELD, EMISSION_DATE_FIELD};
use crate::frete::tools::error::Result;
use crate::frete::tools::model::{Table, Value};

/// Worksheet holding the consolidated report.
pub const FINAL_SHEET: &str = "Planilha Final";
/// Columns flagged for a yellow background in the exported workbook.
pub const HIGHLIGHTED_COLUMNS: [&str; 2] = [COMBINED_DOCUMENT_FIELD, EMISSION_DATE_FIELD];

const HIGHLIGHT_COLOR: u32 = 0xFFFF00;
const DATE_FORMAT: &str = "dd/mm/yyyy";

/// Cell formats for one column of the export.
struct ColumnStyle {
    plain: Option<Format>,
    date: Format,
}

impl ColumnStyle {
    fn new(highlighted: bool) -> Self {
        let base = if highlighted {
            Format::new().set_background_color(Color::RGB(HIGHLIGHT_COLOR))
        } else {
            Format::new()
        };
        Self {
            date: base.clone().set_num_format(DATE_FORMAT),
            plain: highlighted.then_some(base),
        }
    }
}

/// Writes the table to a single-sheet workbook at the given path.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(FINAL_SHEET)?;

    let styles: Vec<ColumnStyle> = table
        .columns()
        .iter()
        .map(|label| ColumnStyle::new(HIGHLIGHTED_COLUMNS.contains(&label.as_str())))
        .collect();

    for (col_idx, (header, style)) in table.columns().iter().zip(&styles).enumerate() {
        let col = col_idx as u16;
        match &style.plain {
            Some(format) => {
                worksheet.set_column_format(col, format)?;
                worksheet.write_string_with_format(0, col, header, format)?;
            }
            None => {
                worksheet.write_string(0, col, header)?;
            }
        }
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col_idx, (cell, style)) in row.iter().zip(&styles).enumerate() {
            write_cell(worksheet, excel_row, col_idx as u16, cell, style)?;
        }
    }

    if table.column_count() > 0 {
        let col_end = (table.column_count() as u16).saturating_sub(1);
        worksheet.autofilter(0, 0, table.len() as u32, col_end)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Value,
    style: &ColumnStyle,
) -> Result<()> {
    match (cell, &style.plain) {
        (Value::DateTime(serial), _) => {
            worksheet.write_number_with_format(row, col, *serial, &style.date)?;
        }
        (Value::Text(text), Some(format)) => {
            worksheet.write_string_with_format(row, col, text, format)?;
        }
        (Value::Text(text), None) => {
            worksheet.write_string(row, col, text)?;
        }
        (Value::Number(number), Some(format)) => {
            worksheet.write_number_with_format(row, col, *number, format)?;
        }
        (Value::Number(number), None) => {
            worksheet.write_number(row, col, *number)?;
        }
        (Value::Boolean(flag), Some(format)) => {
            worksheet.write_boolean_with_format(row, col, *flag, format)?;
        }
        (Value::Boolean(flag), None) => {
            worksheet.write_boolean(row, col, *flag)?;
        }
        (Value::Missing, Some(format)) => {
            worksheet.write_blank(row, col, format)?;
        }
        (Value::Missing, None) => {}
    }
    Ok(())
}
