//! Error types for dataset decoding

/// Errors raised while turning a raw document into records
///
/// Every variant is a data-format problem: retrying the same payload
/// will fail the same way.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Document is not valid JSON
    #[error("dataset is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// Top-level value is neither a list nor a keyed structure
    #[error("unrecognized dataset shape: top-level value is {found}")]
    UnrecognizedShape {
        /// JSON kind that was found instead
        found: &'static str,
    },

    /// A record slot held something other than an object
    #[error("record at {position} is {found}, expected an object")]
    NotARecord {
        /// Index or key of the offending entry
        position: String,
        /// JSON kind that was found instead
        found: &'static str,
    },
}

impl DatasetError {
    /// Create a not-a-record error for the given position
    pub fn not_a_record(position: impl Into<String>, found: &'static str) -> Self {
        Self::NotARecord {
            position: position.into(),
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_error_display() {
        let err = DatasetError::UnrecognizedShape { found: "a string" };
        assert_eq!(
            err.to_string(),
            "unrecognized dataset shape: top-level value is a string"
        );
    }

    #[test]
    fn not_a_record_display() {
        let err = DatasetError::not_a_record("rows[3]", "a number");
        assert_eq!(err.to_string(), "record at rows[3] is a number, expected an object");
    }
}
