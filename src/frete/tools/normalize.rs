//! Canonical lookup keys for column labels.
//!
//! Spreadsheet exports spell the same field with different accents, casing
//! and punctuation (`"Emissão CT-e"` vs `"emissao_ct_e"`). Matching happens on
//! the normalized key only; the original label is what gets displayed.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

/// Converts a column label into its normalized key.
///
/// The label is trimmed, decomposed (NFKD) so that diacritics split from their
/// base letters, stripped of every non-ASCII character, lowercased, and every
/// run of characters outside `[0-9a-z]` collapses into a single `_`. Leading
/// and trailing separators are dropped.
pub fn normalize(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    let mut pending_separator = false;

    for ch in label.trim().nfkd().filter(char::is_ascii) {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_separator && !key.is_empty() {
                key.push('_');
            }
            pending_separator = false;
            key.push(ch);
        } else {
            pending_separator = true;
        }
    }

    key
}

/// Index from normalized key to the label as it appears in a table.
///
/// When several labels share a key the right-most one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedIndex {
    labels: HashMap<String, String>,
}

impl NormalizedIndex {
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let labels = labels
            .into_iter()
            .map(|label| (normalize(label), label.clone()))
            .collect();
        Self { labels }
    }

    /// Resolves a field name of arbitrary spelling to the table's own label.
    pub fn resolve(&self, field: &str) -> Option<&str> {
        self.labels.get(&normalize(field)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
