//! Synthetic columns computed on the ESL export before it is mapped.
//!
//! The positional rules (3rd, 7th, 8th and 9th columns) follow the layout of
//! the ESL Desktop export and are evaluated against the header as loaded,
//! before any derived column is appended.

use tracing::debug;

use crate::frete::tools::model::{Table, Value};

/// Combined invoice / CT-e number column.
pub const COMBINED_DOCUMENT_FIELD: &str = "NM NF NCTE";
/// Alias of the third column carrying the CT-e emission date.
pub const EMISSION_DATE_FIELD: &str = "Emissão CT-e";
pub const CLASSIFICATION_FIELD: &str = "Classificação";
/// Value written into blank classification cells.
pub const CLASSIFICATION_DEFAULT: &str = "EMBARQUE";
pub const FREIGHT_TOTAL_FIELD: &str = "Total Frete";

const GROUP_COLUMN: usize = 6;
const FIRST_DOCUMENT_COLUMN: usize = 7;
const SECOND_DOCUMENT_COLUMN: usize = 8;
const EMISSION_SOURCE_COLUMN: usize = 2;

/// Augments the primary table in place with every derived field whose
/// preconditions hold. Rules whose columns are absent are skipped.
pub fn derive_fields(table: &mut Table) {
    blank_strings_to_missing(table);

    let column_count = table.column_count();

    if column_count > SECOND_DOCUMENT_COLUMN {
        let combined = table
            .rows()
            .iter()
            .map(|row| {
                combine_document_numbers(
                    &row[GROUP_COLUMN],
                    &row[FIRST_DOCUMENT_COLUMN],
                    &row[SECOND_DOCUMENT_COLUMN],
                )
            })
            .collect();
        table.set_column(COMBINED_DOCUMENT_FIELD, combined);
    } else {
        debug!(
            columns = column_count,
            field = COMBINED_DOCUMENT_FIELD,
            "derived field skipped"
        );
    }

    if column_count > EMISSION_SOURCE_COLUMN {
        let emission = table
            .rows()
            .iter()
            .map(|row| row[EMISSION_SOURCE_COLUMN].clone())
            .collect();
        table.set_column(EMISSION_DATE_FIELD, emission);
    } else {
        debug!(
            columns = column_count,
            field = EMISSION_DATE_FIELD,
            "derived field skipped"
        );
    }

    table.update_column(CLASSIFICATION_FIELD, |value| {
        if value.is_missing() {
            Value::Text(CLASSIFICATION_DEFAULT.to_string())
        } else {
            value.clone()
        }
    });

    table.update_column(FREIGHT_TOTAL_FIELD, |value| {
        Value::Number(value.as_number().unwrap_or(0.0))
    });
}

/// Replaces every empty string cell with [`Value::Missing`].
pub fn blank_strings_to_missing(table: &mut Table) {
    table.update_cells(|value| match value {
        Value::Text(text) if text.is_empty() => Some(Value::Missing),
        _ => None,
    });
}

/// Builds `"<G>/<H> | <G>/<I>"`, leaving out the halves whose document
/// number is missing. Both missing yields an empty string.
pub fn combine_document_numbers(group: &Value, first: &Value, second: &Value) -> Value {
    let parts: Vec<String> = [first, second]
        .into_iter()
        .filter(|document| !document.is_missing())
        .map(|document| format!("{group}/{document}"))
        .collect();
    Value::Text(parts.join(" | "))
}
