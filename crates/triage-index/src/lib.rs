//! Triage Symptom Index
//!
//! - [`SymptomIndex`]: id to description, first occurrence wins
//! - [`SymptomIndex::search`]: case-insensitive substring filter, ordered by id
//! - [`collate`]: the id ordering used for display
//!
//! Search is a full linear scan per query. That is fine for the few
//! hundred symptoms a troubleshooting sheet carries and is the scaling
//! boundary of this crate.

#![warn(missing_docs)]

pub mod collate;
pub mod index;

// Re-exports
pub use collate::collate;
pub use index::{SymptomEntry, SymptomIndex};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
