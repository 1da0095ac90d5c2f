//! Symptom index
//!
//! Built by one forward scan over the projected rows. The first row to
//! mention an id provides its description; later rows with the same id
//! are ignored even when their description differs.

use crate::collate::collate;
use indexmap::IndexMap;
use serde::Serialize;
use triage_schema::Row;

/// One selectable symptom
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomEntry {
    /// Symptom id
    pub id: String,
    /// Description from the id's first row
    pub description: String,
}

impl SymptomEntry {
    /// Display label `"<id> — <description>"`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} — {}", self.id, self.description)
    }

    fn matches(&self, needle: &str) -> bool {
        format!("{} {}", self.id, self.description)
            .to_lowercase()
            .contains(needle)
    }
}

/// Deduplicated id to description mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymptomIndex {
    entries: IndexMap<String, String>,
}

impl SymptomIndex {
    /// Build from rows in dataset order
    ///
    /// Rows without a symptom id cannot be selected and are skipped.
    #[must_use]
    pub fn build(rows: &[Row]) -> Self {
        let mut entries = IndexMap::new();
        for row in rows {
            let Some(id) = &row.symptom_id else {
                continue;
            };
            entries
                .entry(id.clone())
                .or_insert_with(|| row.symptom_desc.clone());
        }
        Self { entries }
    }

    /// Number of distinct symptoms
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no symptoms
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Description for an id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = SymptomEntry> + '_ {
        self.entries.iter().map(|(id, description)| SymptomEntry {
            id: id.clone(),
            description: description.clone(),
        })
    }

    /// Filter symptoms by free text
    ///
    /// An entry matches when `"<id> <description>"`, lower-cased, contains
    /// the lower-cased query. An empty query matches everything. Results
    /// are ordered by id under [`collate`].
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SymptomEntry> {
        let needle = query.to_lowercase();
        let mut hits: Vec<SymptomEntry> = self.iter().filter(|e| e.matches(&needle)).collect();
        hits.sort_by(|a, b| collate(&a.id, &b.id));
        hits
    }
}
