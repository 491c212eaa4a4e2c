//! Post-hoc checks over the consolidated table. Nothing here mutates data and
//! nothing here fails; a mismatch only downgrades the verdict.

use serde::Serialize;

use crate::frete::tools::model::Table;

/// Freight value column summed for the consolidated total.
pub const FREIGHT_VALUE_FIELD: &str = "Valor Frete";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
}

/// Expected versus generated row counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowCountCheck {
    pub primary_rows: usize,
    pub secondary_rows: usize,
    pub expected: usize,
    pub actual: usize,
}

impl RowCountCheck {
    pub fn new(primary_rows: usize, secondary_rows: usize, consolidated: &Table) -> Self {
        Self {
            primary_rows,
            secondary_rows,
            expected: primary_rows + secondary_rows,
            actual: consolidated.len(),
        }
    }

    pub fn verdict(&self) -> Verdict {
        if self.expected == self.actual {
            Verdict::Pass
        } else {
            Verdict::Warn
        }
    }
}

/// Sums [`FREIGHT_VALUE_FIELD`] across the consolidated table.
///
/// Values that do not coerce to a number are left out of the sum rather than
/// counted as zero. A table without the column totals `0.0`.
pub fn freight_total(table: &Table) -> f64 {
    table
        .column_values(FREIGHT_VALUE_FIELD)
        .map(|values| values.filter_map(|value| value.as_number()).sum::<f64>())
        .unwrap_or(0.0)
}
