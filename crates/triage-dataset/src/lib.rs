//! Triage Dataset
//!
//! The raw side of a troubleshooting dataset: records, their scalar
//! values, the sentinel cells the dataset uses, and the accepted document
//! shapes.
//!
//! # Core Concepts
//!
//! - [`Record`]: one row, an insertion-ordered map of column name to scalar
//! - [`scalar_text`]: the string form every lookup works on
//! - [`Marker`]: sentinel-aware cell value (`"/"`, `"I"`, text)
//! - [`parse_document`]: accepts a list, a `{ "rows": [...] }` wrapper, or a
//!   keyed object of records
//! - [`DatasetFingerprint`]: Blake3 hash of the raw document
//!
//! # Example
//!
//! ```rust
//! use triage_dataset::{parse_document, DatasetShape};
//!
//! let doc = r#"{ "rows": [ { "Symptom": "S-1", "Description": "No power" } ] }"#;
//! let dataset = parse_document(doc).unwrap();
//! assert_eq!(dataset.shape, DatasetShape::Rows);
//! assert_eq!(dataset.records.len(), 1);
//! ```

#![warn(unreachable_pub)]

mod error;
mod fingerprint;
mod marker;
mod record;
mod shape;

// Re-exports
pub use error::DatasetError;
pub use fingerprint::DatasetFingerprint;
pub use marker::Marker;
pub use record::{is_truthy, scalar_text, Record};
pub use shape::{parse_document, records_from_value, Dataset, DatasetShape};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
