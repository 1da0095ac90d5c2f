//! Triage Resolver
//!
//! The two resolution steps of a troubleshooting session:
//!
//! 1. [`resolve_actions`]: for a chosen symptom, partition its applicable
//!    rows into sub-issue blocks of [`DiagnosticGroup`]s, one group per
//!    distinct support-action text, ordered by the smallest step prefix.
//! 2. [`assemble`]: for a confirmed group, the ordered maintenance
//!    checklist and the spare-part note.
//!
//! Both are pure functions over projected [`triage_schema::Row`]s. They
//! never fail; an unknown symptom simply resolves to nothing.

#![warn(missing_docs)]

pub mod actions;
pub mod maintenance;
pub mod order;

// Re-exports
pub use actions::{resolve_actions, DiagnosticGroup, GroupRef, HowTo, Resolution, SubIssueBlock};
pub use maintenance::{assemble, MaintenancePlan};
pub use order::{order_prefix, NO_ORDER};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
