//! Triage Schema
//!
//! Maps the arbitrary column names of a troubleshooting dataset onto the
//! fixed roles the resolver needs, from a single representative record.
//!
//! # Overview
//!
//! - [`FieldRole`]: the eight logical roles
//! - [`infer_roles`]: heuristic inference from a sample record
//! - [`FieldRoleMap`]: role to column key, immutable once inferred
//! - [`Row`]: a record projected through the map, sentinels classified
//!
//! Inference runs once per dataset load. Nothing downstream looks at raw
//! column names again.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use triage_schema::{infer_roles, FieldRole};
//!
//! let sample = json!({
//!     "Code": "S-12",
//!     "Symptom": "No airflow",
//!     "Category": "HVAC",
//!     "Sub issue": "Fan",
//! });
//! let inference = infer_roles(sample.as_object());
//! assert_eq!(inference.map().key(FieldRole::SymptomId), Some("Code"));
//! assert_eq!(inference.map().key(FieldRole::SymptomDesc), Some("Symptom"));
//! ```

#![warn(missing_docs)]

pub mod inference;
pub mod role;
pub mod row;

// Re-exports
pub use inference::{infer_roles, is_symptom_id, FieldRoleMap, SchemaError, SchemaInference};
pub use role::FieldRole;
pub use row::{Row, DEFAULT_SUB_ISSUE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
