//! Logical column roles

use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// A logical role a dataset column can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// Broad fault category
    Category,
    /// Finer diagnostic category under a symptom
    SubIssue,
    /// Symptom identifier (`S-<digits>`)
    SymptomId,
    /// Human-readable symptom description
    SymptomDesc,
    /// On-site confirmation instruction; distinct text defines a group
    ActionSupport,
    /// One maintenance step, carrying an order prefix
    ActionField,
    /// Spare part note
    SparePart,
    /// Standard operating procedure reference
    SopLink,
}

impl FieldRole {
    /// All roles, in inference and display order
    pub const ALL: [FieldRole; 8] = [
        FieldRole::Category,
        FieldRole::SubIssue,
        FieldRole::SymptomId,
        FieldRole::SymptomDesc,
        FieldRole::ActionSupport,
        FieldRole::ActionField,
        FieldRole::SparePart,
        FieldRole::SopLink,
    ];

    /// Roles resolved by a substring of the lower-cased column name
    pub const TOKEN_MATCHED: [FieldRole; 6] = [
        FieldRole::Category,
        FieldRole::SubIssue,
        FieldRole::ActionSupport,
        FieldRole::ActionField,
        FieldRole::SparePart,
        FieldRole::SopLink,
    ];

    /// Column-name token for token-matched roles
    ///
    /// `None` for the two roles resolved by cell content.
    #[must_use]
    pub const fn key_token(self) -> Option<&'static str> {
        match self {
            Self::Category => Some("category"),
            Self::SubIssue => Some("sub"),
            Self::ActionSupport => Some("support"),
            Self::ActionField => Some("actions for field"),
            Self::SparePart => Some("spare"),
            Self::SopLink => Some("sop"),
            Self::SymptomId | Self::SymptomDesc => None,
        }
    }

    /// Stable snake_case name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::SubIssue => "sub_issue",
            Self::SymptomId => "symptom_id",
            Self::SymptomDesc => "symptom_desc",
            Self::ActionSupport => "action_support",
            Self::ActionField => "action_field",
            Self::SparePart => "spare_part",
            Self::SopLink => "sop_link",
        }
    }

    pub(crate) const fn slot(self) -> usize {
        self as usize
    }
}

impl Display for FieldRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_declaration_order() {
        for (i, role) in FieldRole::ALL.iter().enumerate() {
            assert_eq!(role.slot(), i);
        }
    }

    #[test]
    fn content_roles_have_no_token() {
        assert!(FieldRole::SymptomId.key_token().is_none());
        assert!(FieldRole::SymptomDesc.key_token().is_none());
        assert!(FieldRole::TOKEN_MATCHED.iter().all(|r| r.key_token().is_some()));
    }
}
