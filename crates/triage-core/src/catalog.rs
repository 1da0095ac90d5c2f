//! Loaded dataset, ready for resolution
//!
//! A [`Catalog`] is built once per load: decode the document, infer
//! column roles from the first record, project every record, index the
//! symptoms. It is immutable afterwards.

use crate::config::TriageConfig;
use crate::error::TriageResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use triage_dataset::{parse_document, Dataset, DatasetFingerprint, DatasetShape};
use triage_index::{SymptomEntry, SymptomIndex};
use triage_resolve::{assemble, resolve_actions, DiagnosticGroup, MaintenancePlan, Resolution};
use triage_schema::{infer_roles, FieldRole, FieldRoleMap, Row, SchemaError};

/// Immutable, fully indexed dataset
#[derive(Debug, Clone)]
pub struct Catalog {
    rows: Vec<Row>,
    roles: FieldRoleMap,
    unresolved: Vec<FieldRole>,
    index: SymptomIndex,
    shape: DatasetShape,
    fingerprint: DatasetFingerprint,
    loaded_at: DateTime<Utc>,
}

/// Serializable overview of a catalog
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    /// Accepted document shape
    pub shape: DatasetShape,
    /// Records in the dataset
    pub records: usize,
    /// Distinct symptoms
    pub symptoms: usize,
    /// Document fingerprint
    pub fingerprint: DatasetFingerprint,
    /// Load time
    pub loaded_at: DateTime<Utc>,
    /// Role to column key
    pub roles: FieldRoleMap,
    /// Roles with no column
    pub unresolved: Vec<FieldRole>,
}

impl Catalog {
    /// Decode and index a dataset document
    ///
    /// # Errors
    /// - [`TriageError::DataFormat`](crate::TriageError::DataFormat) if the
    ///   document has no accepted shape
    /// - [`TriageError::Schema`](crate::TriageError::Schema) if roles are
    ///   unresolved and `strict_schema` is set
    pub fn build(text: &str, config: &TriageConfig) -> TriageResult<Self> {
        let dataset = parse_document(text)?;
        Self::from_dataset(dataset, config)
    }

    /// Index an already-decoded dataset
    ///
    /// # Errors
    /// See [`Catalog::build`].
    pub fn from_dataset(dataset: Dataset, config: &TriageConfig) -> TriageResult<Self> {
        let Dataset {
            records,
            shape,
            fingerprint,
        } = dataset;

        let inference = infer_roles(records.first());
        if let Some(note) = inference.diagnostic() {
            if config.strict_schema {
                return Err(SchemaError::Unresolved(inference.unresolved().to_vec()).into());
            }
            tracing::warn!(fingerprint = %fingerprint.short(), "{note}");
        }
        let unresolved = inference.unresolved().to_vec();
        let roles = inference.into_map();

        let rows = roles.project_all(&records);
        let index = SymptomIndex::build(&rows);

        tracing::info!(
            records = rows.len(),
            symptoms = index.len(),
            shape = ?shape,
            fingerprint = %fingerprint.short(),
            "dataset catalog built"
        );

        Ok(Self {
            rows,
            roles,
            unresolved,
            index,
            shape,
            fingerprint,
            loaded_at: Utc::now(),
        })
    }

    /// Projected rows in dataset order
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Inferred role map
    #[inline]
    #[must_use]
    pub fn roles(&self) -> &FieldRoleMap {
        &self.roles
    }

    /// Roles that found no column
    #[inline]
    #[must_use]
    pub fn unresolved(&self) -> &[FieldRole] {
        &self.unresolved
    }

    /// Symptom index
    #[inline]
    #[must_use]
    pub fn index(&self) -> &SymptomIndex {
        &self.index
    }

    /// Document fingerprint
    #[inline]
    #[must_use]
    pub fn fingerprint(&self) -> DatasetFingerprint {
        self.fingerprint
    }

    /// Filter symptoms by free text
    #[inline]
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SymptomEntry> {
        self.index.search(query)
    }

    /// Diagnostic-action groups for a symptom
    #[inline]
    #[must_use]
    pub fn resolve(&self, symptom_id: &str) -> Resolution {
        resolve_actions(&self.rows, symptom_id)
    }

    /// Maintenance plan for a group
    #[inline]
    #[must_use]
    pub fn assemble(&self, group: &DiagnosticGroup) -> Option<MaintenancePlan> {
        assemble(&self.rows, &group.members)
    }

    /// Serializable overview
    #[must_use]
    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            shape: self.shape,
            records: self.rows.len(),
            symptoms: self.index.len(),
            fingerprint: self.fingerprint,
            loaded_at: self.loaded_at,
            roles: self.roles.clone(),
            unresolved: self.unresolved.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TriageError;
    use triage_test_utils::SAMPLE_DATASET;

    #[test]
    fn builds_from_fixture() {
        let catalog = Catalog::build(SAMPLE_DATASET, &TriageConfig::default()).unwrap();
        let summary = catalog.summary();
        assert_eq!(summary.shape, DatasetShape::Rows);
        assert_eq!(summary.records, 8);
        assert_eq!(summary.symptoms, 3);
        assert!(summary.unresolved.is_empty());
    }

    #[test]
    fn empty_dataset_is_valid_and_empty() {
        let catalog = Catalog::build("[]", &TriageConfig::default()).unwrap();
        assert!(catalog.index().is_empty());
        assert!(catalog.search("").is_empty());
        assert!(catalog.resolve("S-1").is_empty());
        assert_eq!(catalog.unresolved().len(), FieldRole::ALL.len());
    }

    #[test]
    fn strict_schema_rejects_partial_roles() {
        let config = TriageConfig::new().with_strict_schema(true);
        let err = Catalog::build(r#"[{"Code": "S-1", "Text": "Leak"}]"#, &config).unwrap_err();
        assert!(matches!(err, TriageError::Schema(SchemaError::Unresolved(_))));
    }

    #[test]
    fn lenient_schema_degrades_to_empty_values() {
        let catalog =
            Catalog::build(r#"[{"Code": "S-1", "Text": "Leak"}]"#, &TriageConfig::default())
                .unwrap();
        assert!(catalog.unresolved().contains(&FieldRole::SubIssue));
        let res = catalog.resolve("S-1");
        assert_eq!(res.blocks.len(), 1);
        assert_eq!(res.blocks[0].label, "Other");
        assert_eq!(res.blocks[0].groups[0].support_text, "");
    }

    #[test]
    fn unrecognized_shape_is_a_data_format_error() {
        let err = Catalog::build("42", &TriageConfig::default()).unwrap_err();
        assert!(matches!(err, TriageError::DataFormat(_)));
        assert!(err.is_fatal());
    }
}
