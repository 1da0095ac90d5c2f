//! Triage Core
//!
//! Owns a troubleshooting session from dataset load to confirmed
//! maintenance checklist.
//!
//! # Lifecycle
//!
//! ```text
//! Unloaded ──begin_load──▶ Loading ──complete_load──▶ Ready ──select / confirm──▶ Ready
//!                             │                         │
//!                             └──────────▶ Failed ◀─────┘ (failed reload)
//!                                            │
//!                                            └──begin_load (retry)──▶ Loading
//! ```
//!
//! Each `begin_load` hands out a [`LoadTicket`]; only the latest ticket
//! can complete, so an overlapping older load never overwrites a newer one.
//!
//! Schema inference and the symptom index are computed once per load into
//! an immutable [`Catalog`]. Operations on a session that is not ready
//! return [`TriageError::NotReady`] so callers can show the loading state.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use triage_core::prelude::*;
//!
//! let mut session = Session::new(TriageConfig::default());
//! session.load(&FileSource::new("data.json")).await;
//!
//! let symptoms = session.search("leak")?;
//! let resolution = session.select_symptom(&symptoms[0].id)?;
//! let group = resolution.groups().next().unwrap().group_ref();
//! let plan = session.confirm_group(&group)?;
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod source;

// Re-exports
pub use catalog::{Catalog, CatalogSummary};
pub use config::{ConfigError, LoadPolicy, TriageConfig};
pub use error::{LoadError, TriageError, TriageResult};
pub use session::{LoadTicket, Selection, Session, SessionHandle, SessionStatus};
pub use source::{fetch_with_policy, DatasetSource, FileSource, StaticSource};

/// Common imports for driving a session
pub mod prelude {
    pub use crate::{
        Catalog, DatasetSource, FileSource, LoadPolicy, Selection, Session, SessionHandle,
        SessionStatus, StaticSource, TriageConfig, TriageError, TriageResult,
    };
    pub use triage_index::SymptomEntry;
    pub use triage_resolve::{DiagnosticGroup, GroupRef, HowTo, MaintenancePlan, Resolution, SubIssueBlock};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
