//! Renaming of repeated column labels.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::warn;

use crate::frete::tools::model::Table;

/// A label that was renamed because it collided with an earlier column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameRecord {
    pub original: String,
    pub renamed: String,
}

/// Renames performed by [`dedupe`], keyed by the original label.
///
/// A label repeated more than twice keeps only its latest rename; the earlier
/// ones are overwritten in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenameReport {
    records: Vec<RenameRecord>,
}

impl RenameReport {
    fn record(&mut self, original: &str, renamed: String) {
        match self.records.iter_mut().find(|entry| entry.original == original) {
            Some(entry) => entry.renamed = renamed,
            None => self.records.push(RenameRecord {
                original: original.to_string(),
                renamed,
            }),
        }
    }

    pub fn records(&self) -> &[RenameRecord] {
        &self.records
    }

    /// Returns the latest new label recorded for `original`.
    pub fn renamed(&self, original: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|entry| entry.original == original)
            .map(|entry| entry.renamed.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Renames every repeated label to `<label>_<n>`, `n` being the number of
/// times the label has already been seen.
///
/// The output has the same length and order as the input and the first
/// occurrence of each label is untouched. When `<label>_<n>` is itself taken
/// by another column, `n` is bumped until the candidate is free.
pub fn dedupe(labels: &[String]) -> (Vec<String>, RenameReport) {
    let taken: HashSet<&str> = labels.iter().map(String::as_str).collect();
    let mut generated: HashSet<String> = HashSet::new();
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(labels.len());
    let mut new_labels = Vec::with_capacity(labels.len());
    let mut report = RenameReport::default();

    for label in labels {
        let count = seen.entry(label.as_str()).or_insert(0);
        if *count == 0 {
            *count = 1;
            new_labels.push(label.clone());
            continue;
        }

        let mut suffix = *count;
        *count += 1;
        let renamed = loop {
            let candidate = format!("{label}_{suffix}");
            if !taken.contains(candidate.as_str()) && !generated.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };

        generated.insert(renamed.clone());
        report.record(label, renamed.clone());
        new_labels.push(renamed);
    }

    (new_labels, report)
}

impl Table {
    /// Applies [`dedupe`] to the table's header, leaving every row untouched.
    pub fn resolve_duplicate_columns(&mut self) -> RenameReport {
        let (labels, report) = dedupe(self.columns());
        for record in report.records() {
            warn!(
                original = %record.original,
                renamed = %record.renamed,
                "duplicate column renamed"
            );
        }
        self.rename_columns(labels);
        report
    }
}
