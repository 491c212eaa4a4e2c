use std::path::Path;

use tracing::{info, instrument, warn};

use crate::frete::tools::consolidate::consolidate;
use crate::frete::tools::dedupe::RenameReport;
use crate::frete::tools::derive::derive_fields;
use crate::frete::tools::error::Result;
use crate::frete::tools::io::{self, table_read};
use crate::frete::tools::mapping::FieldMapping;
use crate::frete::tools::model::Table;
use crate::frete::tools::normalize::NormalizedIndex;
use crate::frete::tools::report::Summary;
use crate::frete::tools::verify::{RowCountCheck, Verdict, freight_total};

/// Everything a consolidation run hands to the exporter and presenter.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidationOutcome {
    pub consolidated: Table,
    pub renames: RenameReport,
    pub row_counts: RowCountCheck,
    pub freight_total: f64,
}

impl ConsolidationOutcome {
    pub fn summary(&self) -> Summary {
        Summary::from_outcome(self)
    }
}

/// Consolidates the ESL export (`primary`) and the SIG model (`secondary`).
///
/// The secondary table has its repeated column labels renamed. The primary
/// table's normalized-key index is taken from its header as loaded, before
/// the derived fields are appended. The result holds the secondary rows
/// followed by one mapped row per primary row. Data-quality problems never
/// abort the run; a row-count mismatch is only reported.
pub fn run(mut primary: Table, mut secondary: Table, mapping: &FieldMapping) -> ConsolidationOutcome {
    let renames = secondary.resolve_duplicate_columns();
    info!(
        esl_rows = primary.len(),
        sig_rows = secondary.len(),
        "input tables ready"
    );

    let index = NormalizedIndex::from_labels(primary.columns());
    derive_fields(&mut primary);
    let consolidated = consolidate(&primary, &index, &secondary, mapping);

    let row_counts = RowCountCheck::new(primary.len(), secondary.len(), &consolidated);
    if row_counts.verdict() == Verdict::Warn {
        warn!(
            expected = row_counts.expected,
            actual = row_counts.actual,
            "consolidated row count does not match inputs"
        );
    }

    let freight_total = freight_total(&consolidated);
    info!(
        rows = consolidated.len(),
        columns = consolidated.column_count(),
        freight_total,
        "consolidation finished"
    );

    ConsolidationOutcome {
        consolidated,
        renames,
        row_counts,
        freight_total,
    }
}

/// Loads both inputs, consolidates them and exports the result to `output`.
#[instrument(
    level = "info",
    skip_all,
    fields(esl = %esl.display(), sig = %sig.display(), output = %output.display())
)]
pub fn consolidate_files(
    esl: &Path,
    sig: &Path,
    output: &Path,
    mapping: &FieldMapping,
) -> Result<ConsolidationOutcome> {
    let primary = table_read::read_table(esl)?;
    let secondary = table_read::read_table(sig)?;
    let outcome = run(primary, secondary, mapping);
    io::export_table(output, &outcome.consolidated)?;
    info!("consolidated report written");
    Ok(outcome)
}
