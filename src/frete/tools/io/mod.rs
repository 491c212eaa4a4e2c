use std::path::Path;

use crate::frete::tools::error::{Result, ToolError};
use crate::frete::tools::model::Table;

pub mod csv_write;
pub mod excel_write;
pub mod table_read;

/// On-disk representations a table can be loaded from or exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularFormat {
    /// Spreadsheet workbooks (`xlsx`, `xlsm`, `xlsb`, `xls`, `ods`).
    Workbook,
    Csv,
}

/// Detects the tabular format from the file extension, case-insensitively.
pub fn tabular_format(path: &Path) -> Result<TabularFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Ok(TabularFormat::Workbook),
        Some("csv") => Ok(TabularFormat::Csv),
        _ => Err(ToolError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Writes the table to `path`, choosing the exporter from the extension.
///
/// Only `.xlsx` workbooks and `.csv` files can be produced.
pub fn export_table(path: &Path, table: &Table) -> Result<()> {
    let is_xlsx = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));

    match tabular_format(path)? {
        TabularFormat::Csv => csv_write::write_table(path, table),
        TabularFormat::Workbook if is_xlsx => excel_write::write_table(path, table),
        TabularFormat::Workbook => Err(ToolError::UnsupportedFormat(path.to_path_buf())),
    }
}
