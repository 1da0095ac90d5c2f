//! Session configuration
//!
//! Every field has a default; a TOML file only needs the keys it changes:
//!
//! ```toml
//! dataset = "data/troubleshooting.json"
//! strict_schema = true
//!
//! [load]
//! timeout_ms = 5000
//! max_attempts = 5
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Errors reading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("io error reading config {path}: {source}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for [`TriageConfig`]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Retry and timeout policy for dataset fetches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadPolicy {
    /// Upper bound for a single fetch attempt
    pub timeout_ms: u64,
    /// Attempts before giving up (at least one is always made)
    pub max_attempts: u32,
    /// Delay before retry `n` is `n * retry_backoff_ms`
    pub retry_backoff_ms: u64,
}

impl LoadPolicy {
    /// Per-attempt timeout
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Delay before the given retry (1-based)
    #[inline]
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(u64::from(retry)))
    }
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_attempts: 3,
            retry_backoff_ms: 250,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Default dataset location
    pub dataset: Option<PathBuf>,
    /// Fail the load when a role finds no column
    pub strict_schema: bool,
    /// Fetch policy
    pub load: LoadPolicy,
}

impl TriageConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With dataset location
    #[inline]
    #[must_use]
    pub fn with_dataset(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset = Some(path.into());
        self
    }

    /// With strict schema checking
    #[inline]
    #[must_use]
    pub fn with_strict_schema(mut self, strict: bool) -> Self {
        self.strict_schema = strict;
        self
    }

    /// With fetch policy
    #[inline]
    #[must_use]
    pub fn with_load_policy(mut self, policy: LoadPolicy) -> Self {
        self.load = policy;
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on malformed TOML or mistyped keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read from a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
