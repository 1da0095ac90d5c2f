//! Error types for triage sessions
//!
//! Provides error handling for:
//! - Dataset fetches (transport, timeout, exhausted retries)
//! - Dataset decoding and schema inference (fatal, reported once per load)
//! - Session misuse (not ready, nothing selected, unknown group)
//!
//! Resolution itself never fails: an unknown symptom or an empty dataset
//! yields an empty result, not an error.

use crate::config::ConfigError;
use crate::session::SessionStatus;
use std::path::PathBuf;
use triage_dataset::DatasetError;
use triage_resolve::GroupRef;
use triage_schema::SchemaError;

/// Transport-level dataset fetch failures
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Dataset path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Non-file transport failure
    #[error("failed to fetch {source_name}: {message}")]
    Transport {
        /// Source description
        source_name: String,
        /// Failure message
        message: String,
    },

    /// A single attempt exceeded the policy timeout
    #[error("timed out after {timeout_ms}ms fetching {source_name}")]
    Timeout {
        /// Source description
        source_name: String,
        /// Timeout that elapsed
        timeout_ms: u64,
    },

    /// Every attempt allowed by the policy failed
    #[error("gave up on {source_name} after {attempts} attempts: {last}")]
    Exhausted {
        /// Source description
        source_name: String,
        /// Attempts made
        attempts: u32,
        /// Error from the final attempt
        #[source]
        last: Box<LoadError>,
    },
}

impl LoadError {
    /// Create a transport error
    pub fn transport(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Whether another attempt under the same policy could succeed
    ///
    /// An exhausted error has already used its attempts; the caller can
    /// still start a fresh load.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Exhausted { .. })
    }
}

/// Main triage error type
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    /// Dataset could not be fetched
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Dataset document has no accepted shape
    #[error("data format error: {0}")]
    DataFormat(#[from] DatasetError),

    /// Schema inference left roles unresolved under strict checking
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Configuration could not be read
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Operation needs a loaded dataset
    #[error("dataset not ready (session is {status})")]
    NotReady {
        /// Session status at the time of the call
        status: SessionStatus,
    },

    /// Group confirmation without a selected symptom
    #[error("no symptom selected")]
    NoSymptomSelected,

    /// Group reference not part of the current resolution
    #[error("no diagnostic group '{}' under sub-issue '{}'", .0.support_text, .0.sub_issue)]
    UnknownGroup(GroupRef),
}

impl TriageError {
    /// Whether retrying the load may help
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Load(_))
    }

    /// Whether the error prevents the session from becoming ready
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Load(_) | Self::DataFormat(_) | Self::Schema(_) | Self::Config(_)
        )
    }
}

/// Result type alias for triage operations
pub type TriageResult<T> = Result<T, TriageError>;
