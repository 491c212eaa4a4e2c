//! Human-readable and JSON presentations of a consolidation run.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::frete::tools::dedupe::RenameReport;
use crate::frete::tools::error::Result;
use crate::frete::tools::model::Table;
use crate::frete::tools::pipeline::ConsolidationOutcome;
use crate::frete::tools::verify::Verdict;

/// Number of consolidated rows shown in the preview.
pub const PREVIEW_ROWS: usize = 5;

/// Scalar results of a run, suitable for serialisation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub renamed_columns: RenameReport,
    pub esl_rows: usize,
    pub sig_rows: usize,
    pub expected_rows: usize,
    pub generated_rows: usize,
    pub verdict: Verdict,
    pub freight_total: f64,
}

impl Summary {
    pub fn from_outcome(outcome: &ConsolidationOutcome) -> Self {
        let counts = outcome.row_counts;
        Self {
            renamed_columns: outcome.renames.clone(),
            esl_rows: counts.primary_rows,
            sig_rows: counts.secondary_rows,
            expected_rows: counts.expected,
            generated_rows: counts.actual,
            verdict: counts.verdict(),
            freight_total: outcome.freight_total,
        }
    }

    /// Writes the summary as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Renders the summary followed by a preview of the consolidated table.
pub fn render(summary: &Summary, consolidated: &Table) -> String {
    let mut out = String::new();

    if !summary.renamed_columns.is_empty() {
        out.push_str("warning: duplicate columns in the SIG sheet were renamed:\n");
        for record in summary.renamed_columns.records() {
            out.push_str(&format!("  {} -> {}\n", record.original, record.renamed));
        }
        out.push('\n');
    }

    out.push_str(&format!("ESL Desktop rows: {}\n", summary.esl_rows));
    out.push_str(&format!("SIG model rows:   {}\n", summary.sig_rows));
    out.push_str(&format!("expected rows:    {}\n", summary.expected_rows));
    out.push_str(&format!("generated rows:   {}\n", summary.generated_rows));
    out.push_str(match summary.verdict {
        Verdict::Pass => "ok: row count matches the sum of both sheets\n",
        Verdict::Warn => "warning: row count does not match; check the mappings or empty rows\n",
    });
    out.push_str(&format!(
        "consolidated freight total: {}\n",
        format_amount(summary.freight_total)
    ));

    out.push('\n');
    out.push_str(&render_preview(consolidated, PREVIEW_ROWS));
    out
}

/// Renders the header and the first `limit` rows, pipe separated.
pub fn render_preview(table: &Table, limit: usize) -> String {
    let mut out = table.columns().join(" | ");
    out.push('\n');
    for row in table.rows().iter().take(limit) {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        out.push_str(&cells.join(" | "));
        out.push('\n');
    }
    out
}

/// Formats an amount with two decimals and comma thousands separators.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let fixed = format!("{:.2}", amount.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (idx, digit) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}
