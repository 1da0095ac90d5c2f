//! Maintenance checklist assembly for a confirmed group

use crate::order::order_of;
use serde::Serialize;
use triage_schema::Row;

/// What the technician does once a diagnostic group is confirmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintenancePlan {
    /// Sub-issue label of the base row
    pub sub_issue: String,
    /// `"<id> — <description>"` of the base row
    pub symptom_label: String,
    /// Step texts in order; duplicates are kept
    pub checklist: Vec<String>,
    /// Spare part note of the base row, unless `"/"` or empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spare_part: Option<String>,
}

/// Assemble the checklist for a confirmed group
///
/// `members` are row indices in dataset order; the first is the base row
/// and supplies the labels and the spare-part note. Steps are sorted by
/// order prefix (stable) and steps without text are dropped. Returns
/// `None` when `members` names no row.
#[must_use]
pub fn assemble(rows: &[Row], members: &[usize]) -> Option<MaintenancePlan> {
    let mut group: Vec<&Row> = members.iter().filter_map(|&i| rows.get(i)).collect();
    let base = *group.first()?;

    group.sort_by_key(|r| order_of(r.action.as_deref()));
    let checklist: Vec<String> = group.iter().filter_map(|r| r.action.clone()).collect();

    Some(MaintenancePlan {
        sub_issue: base.sub_issue.clone(),
        symptom_label: base.symptom_label(),
        checklist,
        spare_part: base.spare_part.value().map(str::to_string),
    })
}
