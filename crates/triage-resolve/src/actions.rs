//! Diagnostic-action resolution for a chosen symptom

use crate::order::order_of;
use indexmap::IndexMap;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use triage_dataset::Marker;
use triage_schema::Row;

/// Where "how to" help for a group points
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum HowTo {
    /// No navigable reference (`"/"`, `"I"`, or empty SOP)
    None,
    /// Opaque link target, verbatim from the SOP cell
    Link(String),
}

impl HowTo {
    fn from_sop(sop: &Marker) -> Self {
        match sop {
            Marker::Value(target) => Self::Link(target.clone()),
            Marker::Absent | Marker::NotApplicable | Marker::InformationalOnly => Self::None,
        }
    }
}

/// Identifies a group within one [`Resolution`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupRef {
    /// Sub-issue label
    pub sub_issue: String,
    /// Exact support-action text
    pub support_text: String,
}

impl GroupRef {
    /// Create a group reference
    #[must_use]
    pub fn new(sub_issue: impl Into<String>, support_text: impl Into<String>) -> Self {
        Self {
            sub_issue: sub_issue.into(),
            support_text: support_text.into(),
        }
    }
}

/// Rows sharing a symptom, a sub-issue and an exact support-action text
///
/// Serializes as the view-model: labels, order, `has_how_to` and the
/// optional `how_to_target`. Member indices stay internal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticGroup {
    /// Sub-issue label
    pub sub_issue: String,
    /// Support-action text of the representative row
    pub support_text: String,
    /// Smallest step order among members
    pub order: u64,
    /// How-to reference of the representative row
    pub how_to: HowTo,
    /// Row indices, in dataset order; the first is the representative
    pub members: Vec<usize>,
}

impl DiagnosticGroup {
    /// Whether the group has navigable how-to help
    #[inline]
    #[must_use]
    pub fn has_how_to(&self) -> bool {
        matches!(self.how_to, HowTo::Link(_))
    }

    /// Link target, when there is one
    #[inline]
    #[must_use]
    pub fn how_to_target(&self) -> Option<&str> {
        match &self.how_to {
            HowTo::Link(target) => Some(target),
            HowTo::None => None,
        }
    }

    /// Reference for confirming this group
    #[must_use]
    pub fn group_ref(&self) -> GroupRef {
        GroupRef::new(&self.sub_issue, &self.support_text)
    }
}

impl Serialize for DiagnosticGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DiagnosticGroup", 5)?;
        state.serialize_field("sub_issue", &self.sub_issue)?;
        state.serialize_field("support_text", &self.support_text)?;
        state.serialize_field("order", &self.order)?;
        state.serialize_field("has_how_to", &self.has_how_to())?;
        match self.how_to_target() {
            Some(target) => state.serialize_field("how_to_target", target)?,
            None => state.skip_field("how_to_target")?,
        }
        state.end()
    }
}

/// Groups of one sub-issue, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubIssueBlock {
    /// Sub-issue label
    pub label: String,
    /// Groups ordered by [`DiagnosticGroup::order`]
    pub groups: Vec<DiagnosticGroup>,
}

/// Everything a symptom resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Symptom the blocks belong to
    pub symptom_id: String,
    /// Blocks in first-seen order of their label
    pub blocks: Vec<SubIssueBlock>,
}

impl Resolution {
    /// Whether no applicable rows were found
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All groups in display order
    pub fn groups(&self) -> impl Iterator<Item = &DiagnosticGroup> {
        self.blocks.iter().flat_map(|b| b.groups.iter())
    }

    /// Look up a group by reference
    #[must_use]
    pub fn find(&self, group: &GroupRef) -> Option<&DiagnosticGroup> {
        self.blocks
            .iter()
            .filter(|b| b.label == group.sub_issue)
            .flat_map(|b| b.groups.iter())
            .find(|g| g.support_text == group.support_text)
    }
}

/// Resolve the diagnostic-action groups of a symptom
///
/// Rows apply when their symptom id equals `symptom_id` exactly and their
/// support action is not the `"/"` sentinel. They are partitioned by
/// sub-issue, then by exact support-action text. Groups within a block
/// are sorted by their smallest step order; equal orders keep dataset
/// order.
#[must_use]
pub fn resolve_actions(rows: &[Row], symptom_id: &str) -> Resolution {
    let mut by_sub: IndexMap<&str, IndexMap<&str, Vec<usize>>> = IndexMap::new();

    for (idx, row) in rows.iter().enumerate() {
        if row.symptom_id.as_deref() != Some(symptom_id) || row.support.is_not_applicable() {
            continue;
        }
        // A missing cell groups with an empty one; both render as no text.
        let support = row.support.value().unwrap_or_default();
        by_sub
            .entry(row.sub_issue.as_str())
            .or_default()
            .entry(support)
            .or_default()
            .push(idx);
    }

    let blocks: Vec<SubIssueBlock> = by_sub
        .into_iter()
        .map(|(label, by_support)| {
            let mut groups: Vec<DiagnosticGroup> = by_support
                .into_iter()
                .map(|(support, members)| build_group(rows, label, support, members))
                .collect();
            groups.sort_by_key(|g| g.order);
            SubIssueBlock {
                label: label.to_string(),
                groups,
            }
        })
        .collect();

    tracing::debug!(
        symptom = symptom_id,
        blocks = blocks.len(),
        groups = blocks.iter().map(|b| b.groups.len()).sum::<usize>(),
        "resolved diagnostic actions"
    );

    Resolution {
        symptom_id: symptom_id.to_string(),
        blocks,
    }
}

fn build_group(rows: &[Row], sub_issue: &str, support: &str, members: Vec<usize>) -> DiagnosticGroup {
    let order = members
        .iter()
        .map(|&i| order_of(rows[i].action.as_deref()))
        .min()
        .unwrap_or(crate::NO_ORDER);
    let how_to = members
        .first()
        .map_or(HowTo::None, |&i| HowTo::from_sop(&rows[i].sop));

    DiagnosticGroup {
        sub_issue: sub_issue.to_string(),
        support_text: support.to_string(),
        order,
        how_to,
        members,
    }
}
