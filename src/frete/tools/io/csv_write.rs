use std::path::Path;

use crate::frete::tools::error::Result;
use crate::frete::tools::model::Table;

/// Writes the table as a comma separated file with a header record.
///
/// Missing cells become empty fields; numbers use the same rendering as
/// [`Value`](crate::frete::tools::model::Value)'s `Display`.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(ToString::to_string))?;
    }
    writer.flush()?;
    Ok(())
}
