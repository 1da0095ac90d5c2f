//! Records projected through a [`FieldRoleMap`]

use crate::inference::FieldRoleMap;
use crate::role::FieldRole;
use serde::Serialize;
use triage_dataset::{is_truthy, Marker, Record};

/// Sub-issue label for rows whose sub-issue cell is missing or empty
pub const DEFAULT_SUB_ISSUE: &str = "Other";

/// Typed view of one record
///
/// Sentinels are classified here, once per load. Unresolved roles show up
/// as empty text or [`Marker::Absent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// Category text (may be empty)
    pub category: String,
    /// Symptom id, if the cell has text
    pub symptom_id: Option<String>,
    /// Symptom description (may be empty)
    pub symptom_desc: String,
    /// Sub-issue label, [`DEFAULT_SUB_ISSUE`] when missing
    pub sub_issue: String,
    /// Support action; `Value` keeps the exact untrimmed text
    pub support: Marker,
    /// Maintenance step text, if the cell carries content
    pub action: Option<String>,
    /// Spare part note, trimmed
    pub spare_part: Marker,
    /// SOP reference
    pub sop: Marker,
}

impl FieldRoleMap {
    /// Project a record into a [`Row`]
    #[must_use]
    pub fn project(&self, record: &Record) -> Row {
        let text = |role| self.text(record, role);

        let sub_issue = text(FieldRole::SubIssue)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SUB_ISSUE.to_string());

        let action = if is_truthy(self.cell(record, FieldRole::ActionField)) {
            text(FieldRole::ActionField)
        } else {
            None
        };

        Row {
            category: text(FieldRole::Category).unwrap_or_default(),
            symptom_id: text(FieldRole::SymptomId),
            symptom_desc: text(FieldRole::SymptomDesc).unwrap_or_default(),
            sub_issue,
            support: Marker::support_action(text(FieldRole::ActionSupport)),
            action,
            spare_part: Marker::spare_part(text(FieldRole::SparePart)),
            sop: Marker::sop(text(FieldRole::SopLink)),
        }
    }

    /// Project every record, preserving order
    #[must_use]
    pub fn project_all(&self, records: &[Record]) -> Vec<Row> {
        records.iter().map(|r| self.project(r)).collect()
    }
}

impl Row {
    /// Display label `"<id> — <description>"`
    #[must_use]
    pub fn symptom_label(&self) -> String {
        format!(
            "{} — {}",
            self.symptom_id.as_deref().unwrap_or_default(),
            self.symptom_desc
        )
    }
}
