//! Schema inference from a sample record
//!
//! The heuristic assumes the column naming convention of a single
//! external source and looks at one record only. It is not validated
//! against the rest of the dataset.

use crate::role::FieldRole;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::Serialize;
use triage_dataset::{is_truthy, scalar_text, Record};

static SYMPTOM_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^s-[0-9]+").expect("symptom id pattern is valid"));

/// Whether text looks like a symptom id (`S-<digits>`, any case, anchored at start)
#[inline]
#[must_use]
pub fn is_symptom_id(text: &str) -> bool {
    SYMPTOM_ID.is_match(text)
}

/// Role to column key mapping
///
/// Built once per dataset load and never re-derived per record. A role
/// may be unresolved; lookups through it yield nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRoleMap {
    keys: [Option<String>; 8],
}

impl FieldRoleMap {
    /// Create an empty map (every role unresolved)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a role to a column key
    #[must_use]
    pub fn with(mut self, role: FieldRole, key: impl Into<String>) -> Self {
        self.keys[role.slot()] = Some(key.into());
        self
    }

    /// Column key serving a role
    #[inline]
    #[must_use]
    pub fn key(&self, role: FieldRole) -> Option<&str> {
        self.keys[role.slot()].as_deref()
    }

    /// Roles with no column, in role order
    #[must_use]
    pub fn unresolved(&self) -> Vec<FieldRole> {
        FieldRole::ALL
            .into_iter()
            .filter(|r| self.key(*r).is_none())
            .collect()
    }

    /// Raw cell for a role
    #[inline]
    #[must_use]
    pub fn cell<'r>(&self, record: &'r Record, role: FieldRole) -> Option<&'r serde_json::Value> {
        record.get(self.key(role)?)
    }

    /// Scalar text of a role's cell
    #[inline]
    #[must_use]
    pub fn text(&self, record: &Record, role: FieldRole) -> Option<String> {
        scalar_text(self.cell(record, role))
    }
}

impl Serialize for FieldRoleMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(FieldRole::ALL.len()))?;
        for role in FieldRole::ALL {
            map.serialize_entry(role.name(), &self.key(role))?;
        }
        map.end()
    }
}

/// Errors from schema inference
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Some roles found no column in the sample
    #[error("unresolved field roles: {}", join_roles(.0))]
    Unresolved(Vec<FieldRole>),
}

fn join_roles(roles: &[FieldRole]) -> String {
    roles.iter().map(|r| r.name()).collect::<Vec<_>>().join(", ")
}

/// Outcome of inference: the map plus what it could not resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaInference {
    map: FieldRoleMap,
    unresolved: Vec<FieldRole>,
}

impl SchemaInference {
    /// The inferred map, complete or not
    #[inline]
    #[must_use]
    pub fn map(&self) -> &FieldRoleMap {
        &self.map
    }

    /// Roles left unresolved, in role order
    #[inline]
    #[must_use]
    pub fn unresolved(&self) -> &[FieldRole] {
        &self.unresolved
    }

    /// Whether every role found a column
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Human-readable note on unresolved roles, if any
    #[must_use]
    pub fn diagnostic(&self) -> Option<String> {
        if self.is_complete() {
            None
        } else {
            Some(format!(
                "no column found for {}; dependent values will be empty",
                join_roles(&self.unresolved)
            ))
        }
    }

    /// Take the map, keeping partial results
    #[inline]
    #[must_use]
    pub fn into_map(self) -> FieldRoleMap {
        self.map
    }

    /// Take the map only if every role resolved
    ///
    /// # Errors
    /// Returns [`SchemaError::Unresolved`] listing the missing roles.
    pub fn into_complete(self) -> Result<FieldRoleMap, SchemaError> {
        if self.unresolved.is_empty() {
            Ok(self.map)
        } else {
            Err(SchemaError::Unresolved(self.unresolved))
        }
    }
}

/// Infer column roles from one sample record
///
/// Token-matched roles take the first key, in the sample's key order,
/// whose lower-cased name contains the role's token. The symptom id takes
/// the first key whose value looks like `S-<digits>`. The description
/// takes the first other key whose value is non-empty and does not look
/// like a symptom id. With no sample every role is unresolved.
#[must_use]
pub fn infer_roles(sample: Option<&Record>) -> SchemaInference {
    let mut map = FieldRoleMap::new();

    if let Some(sample) = sample {
        for role in FieldRole::TOKEN_MATCHED {
            let Some(token) = role.key_token() else {
                continue;
            };
            if let Some(key) = sample.keys().find(|k| k.to_lowercase().contains(token)) {
                map = map.with(role, key.as_str());
            }
        }

        let id_key = sample
            .iter()
            .find(|(_, v)| scalar_text(Some(*v)).is_some_and(|t| is_symptom_id(&t)))
            .map(|(k, _)| k.clone());

        let desc_key = sample
            .iter()
            .find(|(k, v)| {
                Some(k.as_str()) != id_key.as_deref()
                    && is_truthy(Some(*v))
                    && scalar_text(Some(*v)).is_some_and(|t| !is_symptom_id(&t))
            })
            .map(|(k, _)| k.clone());

        if let Some(key) = id_key {
            map = map.with(FieldRole::SymptomId, key);
        }
        if let Some(key) = desc_key {
            map = map.with(FieldRole::SymptomDesc, key);
        }
    }

    let unresolved = map.unresolved();
    SchemaInference { map, unresolved }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn full_sample() -> Record {
        record(json!({
            "Category": "Cooling",
            "Symptom ID": "S-101",
            "Symptom description": "Unit blows warm air",
            "Sub Issue": "Compressor",
            "Support actions": "Check compressor current",
            "Actions for field technician": "1_Measure current",
            "Spare part": "/",
            "SOP": "https://sop.example/101",
        }))
    }

    #[test]
    fn resolves_every_role_on_conventional_columns() {
        let inference = infer_roles(Some(&full_sample()));
        assert!(inference.is_complete());
        let map = inference.map();
        assert_eq!(map.key(FieldRole::Category), Some("Category"));
        assert_eq!(map.key(FieldRole::SymptomId), Some("Symptom ID"));
        assert_eq!(map.key(FieldRole::SymptomDesc), Some("Category"));
        assert_eq!(map.key(FieldRole::SubIssue), Some("Sub Issue"));
        assert_eq!(map.key(FieldRole::ActionSupport), Some("Support actions"));
        assert_eq!(map.key(FieldRole::ActionField), Some("Actions for field technician"));
        assert_eq!(map.key(FieldRole::SparePart), Some("Spare part"));
        assert_eq!(map.key(FieldRole::SopLink), Some("SOP"));
    }

    #[test]
    fn description_is_first_non_id_non_empty_value() {
        let sample = record(json!({
            "Empty": "",
            "Id": "s-7",
            "Other id": "S-8",
            "Text": "Noisy fan",
        }));
        let inference = infer_roles(Some(&sample));
        assert_eq!(inference.map().key(FieldRole::SymptomId), Some("Id"));
        assert_eq!(inference.map().key(FieldRole::SymptomDesc), Some("Text"));
    }

    #[test]
    fn numeric_zero_is_not_a_description() {
        let sample = record(json!({ "Id": "S-1", "Count": 0, "Label": "Leak" }));
        let inference = infer_roles(Some(&sample));
        assert_eq!(inference.map().key(FieldRole::SymptomDesc), Some("Label"));
    }

    #[test]
    fn token_match_takes_first_key_in_document_order() {
        let sample = record(json!({ "Subsystem": "A", "Sub issue": "B", "Id": "S-1" }));
        let inference = infer_roles(Some(&sample));
        assert_eq!(inference.map().key(FieldRole::SubIssue), Some("Subsystem"));
    }

    #[test]
    fn id_pattern_is_anchored() {
        assert!(is_symptom_id("S-12"));
        assert!(is_symptom_id("s-3 extra"));
        assert!(!is_symptom_id("XS-12"));
        assert!(!is_symptom_id("S-"));
        assert!(!is_symptom_id(" S-1"));
    }

    #[test]
    fn missing_sample_leaves_everything_unresolved() {
        let inference = infer_roles(None);
        assert_eq!(inference.unresolved(), FieldRole::ALL.as_slice());
        assert!(inference.diagnostic().is_some());
    }

    #[test]
    fn into_complete_lists_unresolved_roles() {
        let sample = record(json!({ "Id": "S-1", "Text": "Leak", "Category": "Water" }));
        let err = infer_roles(Some(&sample)).into_complete().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unresolved field roles: sub_issue, action_support, action_field, spare_part, sop_link"
        );
    }

    #[test]
    fn lookups_through_unresolved_roles_are_empty() {
        let map = FieldRoleMap::new();
        assert_eq!(map.text(&full_sample(), FieldRole::SopLink), None);
    }

    #[test]
    fn map_serializes_in_role_order() {
        let map = FieldRoleMap::new().with(FieldRole::SymptomId, "Code");
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["symptom_id"], "Code");
        assert!(json["sop_link"].is_null());
    }
}
