use tracing::{debug, info};

use crate::frete::tools::mapping::FieldMapping;
use crate::frete::tools::model::{Table, Value};
use crate::frete::tools::normalize::NormalizedIndex;

/// A mapping pair whose source was found among the primary table's columns.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedField<'a> {
    column: usize,
    destination: &'a str,
}

/// Resolves each mapping source through `index`, then locates the resolved
/// label among the primary table's current columns. Unresolvable sources are
/// dropped.
fn resolve_fields<'a>(
    primary: &Table,
    index: &NormalizedIndex,
    mapping: &'a FieldMapping,
) -> Vec<ResolvedField<'a>> {
    mapping
        .pairs()
        .iter()
        .filter_map(|pair| {
            let Some(label) = index.resolve(&pair.source) else {
                debug!(source = %pair.source, "mapping source not found in primary table");
                return None;
            };
            let column = primary.column_index(label)?;
            Some(ResolvedField {
                column,
                destination: pair.destination.as_str(),
            })
        })
        .collect()
}

/// Translates one primary row into `(destination, value)` pairs, in mapping
/// order.
fn translate_row(row: &[Value], fields: &[ResolvedField<'_>]) -> Vec<(String, Value)> {
    fields
        .iter()
        .map(|field| (field.destination.to_string(), row[field.column].clone()))
        .collect()
}

/// Builds the consolidated table: every secondary row verbatim, followed by
/// one translated row per primary row.
///
/// `index` is the primary table's normalized-key index taken from its header
/// as loaded, before derived fields were appended; derived columns only feed
/// the mapping when the loaded header already carried that label.
/// Destination columns unknown to the secondary table are appended after its
/// own columns, and each row leaves the columns it does not fill missing.
pub fn consolidate(
    primary: &Table,
    index: &NormalizedIndex,
    secondary: &Table,
    mapping: &FieldMapping,
) -> Table {
    let fields = resolve_fields(primary, index, mapping);
    info!(
        resolved = fields.len(),
        mapped = mapping.len(),
        "resolved mapping sources against primary table"
    );

    let mut consolidated = secondary.clone();
    for row in primary.rows() {
        consolidated.append_record(translate_row(row, &fields));
    }
    consolidated
}
