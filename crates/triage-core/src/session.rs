//! Troubleshooting session
//!
//! A [`Session`] owns the loaded [`Catalog`] and the current selection.
//! It is passed explicitly to every operation; there is no ambient state.

use crate::catalog::Catalog;
use crate::config::TriageConfig;
use crate::error::{LoadError, TriageError, TriageResult};
use crate::source::{fetch_with_policy, DatasetSource};
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use triage_index::SymptomEntry;
use triage_resolve::{GroupRef, MaintenancePlan, Resolution};

/// Observable lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No load attempted yet
    Unloaded,
    /// Fetch in flight
    Loading,
    /// Catalog available
    Ready,
    /// Last load failed; see [`Session::last_error`]
    Failed,
}

impl Display for SessionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed => "failed",
        })
    }
}

/// Identifies one load started by [`Session::begin_load`]
///
/// Only the ticket of the most recent load can complete it; results of
/// superseded loads are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct LoadTicket(u64);

#[derive(Debug)]
enum Phase {
    Unloaded,
    Loading(LoadTicket),
    Ready(Arc<Catalog>),
    Failed(Arc<TriageError>),
}

/// Current symptom, its resolution and the confirmed plan
#[derive(Debug, Clone)]
pub struct Selection {
    resolution: Resolution,
    confirmed: Option<(GroupRef, MaintenancePlan)>,
}

impl Selection {
    /// Selected symptom id
    #[inline]
    #[must_use]
    pub fn symptom_id(&self) -> &str {
        &self.resolution.symptom_id
    }

    /// Groups offered for the symptom
    #[inline]
    #[must_use]
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Confirmed group and its plan, if any
    #[inline]
    #[must_use]
    pub fn confirmed(&self) -> Option<(&GroupRef, &MaintenancePlan)> {
        self.confirmed.as_ref().map(|(g, p)| (g, p))
    }
}

/// A single user's troubleshooting session
#[derive(Debug)]
pub struct Session {
    config: TriageConfig,
    phase: Phase,
    generation: u64,
    selection: Option<Selection>,
}

impl Session {
    /// Create an unloaded session
    #[must_use]
    pub fn new(config: TriageConfig) -> Self {
        Self {
            config,
            phase: Phase::Unloaded,
            generation: 0,
            selection: None,
        }
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Current lifecycle status
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        match self.phase {
            Phase::Unloaded => SessionStatus::Unloaded,
            Phase::Loading(_) => SessionStatus::Loading,
            Phase::Ready(_) => SessionStatus::Ready,
            Phase::Failed(_) => SessionStatus::Failed,
        }
    }

    /// Loaded catalog, when ready
    #[must_use]
    pub fn catalog(&self) -> Option<&Arc<Catalog>> {
        match &self.phase {
            Phase::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    /// Error of the last failed load
    #[must_use]
    pub fn last_error(&self) -> Option<&TriageError> {
        match &self.phase {
            Phase::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Current selection
    #[inline]
    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Enter the loading state
    ///
    /// Valid from any state; from `Failed` this is the retry. The previous
    /// catalog and selection are dropped, and any load still in flight is
    /// superseded.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket(self.generation);
        tracing::debug!(from = %self.status(), load = ticket.0, "dataset load started");
        self.phase = Phase::Loading(ticket);
        self.selection = None;
        ticket
    }

    /// Finish a load with the fetched document
    ///
    /// Builds the catalog on success. Any failure, fetched or structural,
    /// moves the session to `Failed` and is kept for [`Session::last_error`].
    /// A ticket that is not the one currently loading leaves the session
    /// untouched.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        fetched: Result<String, LoadError>,
    ) -> SessionStatus {
        if !matches!(self.phase, Phase::Loading(current) if current == ticket) {
            tracing::debug!(load = ticket.0, status = %self.status(), "superseded dataset load dropped");
            return self.status();
        }

        let built = fetched
            .map_err(TriageError::from)
            .and_then(|text| Catalog::build(&text, &self.config));

        self.selection = None;
        self.phase = match built {
            Ok(catalog) => Phase::Ready(Arc::new(catalog)),
            Err(err) => {
                tracing::error!(error = %err, retryable = err.is_retryable(), "dataset load failed");
                Phase::Failed(Arc::new(err))
            }
        };
        self.status()
    }

    /// Fetch from a source under the configured policy and load
    pub async fn load(&mut self, source: &dyn DatasetSource) -> SessionStatus {
        let ticket = self.begin_load();
        let fetched = fetch_with_policy(source, &self.config.load).await;
        self.complete_load(ticket, fetched)
    }

    fn ready(&self) -> TriageResult<&Arc<Catalog>> {
        self.catalog().ok_or(TriageError::NotReady {
            status: self.status(),
        })
    }

    /// Filter symptoms by free text
    ///
    /// # Errors
    /// Returns [`TriageError::NotReady`] unless the session is ready.
    pub fn search(&self, query: &str) -> TriageResult<Vec<SymptomEntry>> {
        Ok(self.ready()?.search(query))
    }

    /// Select a symptom, replacing the previous selection
    ///
    /// Any confirmed group is discarded. An unknown id is not an error; it
    /// resolves to no groups.
    ///
    /// # Errors
    /// Returns [`TriageError::NotReady`] unless the session is ready.
    pub fn select_symptom(&mut self, symptom_id: &str) -> TriageResult<&Resolution> {
        let resolution = self.ready()?.resolve(symptom_id);
        let selection = self.selection.insert(Selection {
            resolution,
            confirmed: None,
        });
        Ok(&selection.resolution)
    }

    /// Confirm a diagnostic group of the selected symptom
    ///
    /// # Errors
    /// - [`TriageError::NotReady`] unless the session is ready
    /// - [`TriageError::NoSymptomSelected`] before [`Session::select_symptom`]
    /// - [`TriageError::UnknownGroup`] if the group is not in the current resolution
    pub fn confirm_group(&mut self, group: &GroupRef) -> TriageResult<&MaintenancePlan> {
        let catalog = Arc::clone(self.ready()?);
        let selection = self
            .selection
            .as_mut()
            .ok_or(TriageError::NoSymptomSelected)?;

        let plan = selection
            .resolution
            .find(group)
            .and_then(|g| catalog.assemble(g))
            .ok_or_else(|| TriageError::UnknownGroup(group.clone()))?;

        tracing::debug!(
            symptom = selection.symptom_id(),
            sub_issue = %group.sub_issue,
            steps = plan.checklist.len(),
            "diagnostic group confirmed"
        );

        let (_, plan) = selection.confirmed.insert((group.clone(), plan));
        Ok(plan)
    }
}

/// Shared session whose status can be read while a load is in flight
///
/// The lock is never held across the fetch, so readers see `Loading`.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    inner: Arc<RwLock<Session>>,
}

impl SessionHandle {
    /// Wrap a new session
    #[must_use]
    pub fn new(config: TriageConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Session::new(config))),
        }
    }

    /// Current status
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.inner.read().status()
    }

    /// Run a closure with shared access
    pub fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run a closure with exclusive access
    pub fn write<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Fetch and load without holding the lock during the fetch
    ///
    /// If another load starts meanwhile, this one's result is dropped and
    /// the status left by the newer load is returned.
    pub async fn load(&self, source: &dyn DatasetSource) -> SessionStatus {
        let (ticket, policy) = {
            let mut session = self.inner.write();
            let ticket = session.begin_load();
            (ticket, session.config().load.clone())
        };
        let fetched = fetch_with_policy(source, &policy).await;
        self.inner.write().complete_load(ticket, fetched)
    }
}
