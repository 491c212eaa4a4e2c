use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the failures that stop a consolidation run.
///
/// Data-quality problems inside the spreadsheets never surface here; they are
/// degraded value by value and reported through the summary instead.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the spreadsheet reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::Error),

    /// Errors raised while reading or writing delimited files.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when a workbook does not contain any worksheet to load.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when a file extension does not map to a known tabular format.
    #[error("unsupported tabular format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Raised when a field mapping override is malformed.
    #[error("invalid field mapping: {0}")]
    InvalidMapping(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
