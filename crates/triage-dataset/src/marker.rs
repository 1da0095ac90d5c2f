//! Sentinel-aware cell values
//!
//! The dataset encodes "not applicable" as `"/"` and "informational only,
//! no link" as `"I"`. Cells are classified once at load so the rest of
//! the system branches on [`Marker`] instead of comparing strings.

use serde::Serialize;

/// Sentinel used for "not applicable"
const NOT_APPLICABLE: &str = "/";

/// Sentinel used for "informational only" on SOP cells
const INFORMATIONAL_ONLY: &str = "I";

/// A classified cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Marker {
    /// Cell missing or empty
    Absent,
    /// Cell holds the `"/"` sentinel
    NotApplicable,
    /// Cell holds the `"I"` sentinel (SOP cells only)
    InformationalOnly,
    /// Cell holds real content
    Value(String),
}

impl Marker {
    /// Classify a support-action cell
    ///
    /// Only the trimmed `"/"` is special. Any other text is kept verbatim,
    /// untrimmed, because the exact text is the grouping key.
    #[must_use]
    pub fn support_action(text: Option<String>) -> Self {
        match text {
            None => Self::Absent,
            Some(t) if t.trim() == NOT_APPLICABLE => Self::NotApplicable,
            Some(t) => Self::Value(t),
        }
    }

    /// Classify a spare-part cell (content is kept trimmed)
    #[must_use]
    pub fn spare_part(text: Option<String>) -> Self {
        let trimmed = text.as_deref().map(str::trim).unwrap_or_default();
        match trimmed {
            "" => Self::Absent,
            NOT_APPLICABLE => Self::NotApplicable,
            t => Self::Value(t.to_string()),
        }
    }

    /// Classify an SOP cell
    ///
    /// Classification is case-insensitive on the trimmed text; a navigable
    /// value keeps the raw cell text as an opaque link target.
    #[must_use]
    pub fn sop(text: Option<String>) -> Self {
        let Some(raw) = text else {
            return Self::Absent;
        };
        let normalized = raw.trim().to_uppercase();
        match normalized.as_str() {
            "" => Self::Absent,
            NOT_APPLICABLE => Self::NotApplicable,
            INFORMATIONAL_ONLY => Self::InformationalOnly,
            _ => Self::Value(raw),
        }
    }

    /// Content, if this cell holds any
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Whether the cell is the not-applicable sentinel
    #[inline]
    #[must_use]
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn support_sentinel_ignores_whitespace() {
        assert_eq!(Marker::support_action(s("  / ")), Marker::NotApplicable);
        assert_eq!(Marker::support_action(s(" Check fan ")), Marker::Value(" Check fan ".into()));
        assert_eq!(Marker::support_action(None), Marker::Absent);
    }

    #[test]
    fn spare_part_is_trimmed() {
        assert_eq!(Marker::spare_part(s(" Filter X ")), Marker::Value("Filter X".into()));
        assert_eq!(Marker::spare_part(s("/")), Marker::NotApplicable);
        assert_eq!(Marker::spare_part(s("   ")), Marker::Absent);
    }

    #[test]
    fn sop_sentinels_are_case_insensitive() {
        assert_eq!(Marker::sop(s("i")), Marker::InformationalOnly);
        assert_eq!(Marker::sop(s(" I ")), Marker::InformationalOnly);
        assert_eq!(Marker::sop(s("/")), Marker::NotApplicable);
        assert_eq!(
            Marker::sop(s("https://docs.example/sop/12")),
            Marker::Value("https://docs.example/sop/12".into())
        );
        assert_eq!(Marker::sop(s("")), Marker::Absent);
    }
}
