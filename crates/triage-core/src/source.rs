//! Dataset sources and the fetch policy
//!
//! Retrieval is an external concern; the session only needs the document
//! text. [`fetch_with_policy`] adds the timeout and retry behavior.

use crate::config::LoadPolicy;
use crate::error::LoadError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Something that can produce the raw dataset document
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetch the document text
    async fn fetch(&self) -> Result<String, LoadError>;

    /// Short description for logs and errors
    fn describe(&self) -> String;
}

/// Dataset read from a local file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a file source
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    async fn fetch(&self) -> Result<String, LoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Dataset held in memory
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    text: String,
}

impl StaticSource {
    /// Create an in-memory source
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
impl DatasetSource for StaticSource {
    async fn fetch(&self) -> Result<String, LoadError> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Fetch under a timeout and retry policy
///
/// Each attempt is bounded by [`LoadPolicy::timeout`]. Failed attempts are
/// retried with linear backoff until `max_attempts` is reached; after the
/// final failure the error is wrapped in [`LoadError::Exhausted`] when more
/// than one attempt was made.
///
/// # Errors
/// Returns the last [`LoadError`] once the policy is used up.
pub async fn fetch_with_policy(
    source: &dyn DatasetSource,
    policy: &LoadPolicy,
) -> Result<String, LoadError> {
    let attempts = policy.max_attempts.max(1);
    let name = source.describe();
    let mut attempt = 0;

    loop {
        attempt += 1;
        let outcome = match tokio::time::timeout(policy.timeout(), source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(LoadError::Timeout {
                source_name: name.clone(),
                timeout_ms: policy.timeout_ms,
            }),
        };

        match outcome {
            Ok(text) => {
                if attempt > 1 {
                    tracing::info!(source = %name, attempt, "dataset fetched after retry");
                }
                return Ok(text);
            }
            Err(err) if attempt < attempts && err.is_retryable() => {
                tracing::warn!(source = %name, attempt, error = %err, "dataset fetch failed, retrying");
                tokio::time::sleep(policy.backoff(attempt)).await;
            }
            Err(err) if attempt > 1 => {
                return Err(LoadError::Exhausted {
                    source_name: name,
                    attempts: attempt,
                    last: Box::new(err),
                });
            }
            Err(err) => return Err(err),
        }
    }
}
