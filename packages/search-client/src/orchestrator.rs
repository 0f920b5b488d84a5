//! State-wide search orchestration.
//!
//! The registry cannot search a whole state in one call, so a search is
//! split into one sub-query per city and run strictly one city at a time.
//! Results are appended in city order and published through a
//! [`watch`] channel as a [`SearchView`] snapshot.
//!
//! # Sessions
//!
//! Every call to [`SearchOrchestrator::start`] opens a new session with a
//! larger id and supersedes whatever was running. A running session only
//! touches the view while the view still carries its own id and is still
//! `Running`; anything else is a stale result and is dropped. The check and
//! the write happen under the channel's lock, so a superseded or cancelled
//! session can never leak rows into the view.
//!
//! ```text
//! Idle ──start──► Running ──last city──► Completed
//!                    │ ──cancel──────► Cancelled
//!                    └ ──start again──► Superseded (view now owned by newer session)
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use npi_registry::NormalizedRow;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backend::SearchBackend;
use crate::criteria::{SearchCriteria, SubQuery};
use crate::directory::{CityDirectory, StateEntry};
use crate::error::{ClientError, Result};

pub const NO_CITIES_MESSAGE: &str = "No cities found for the selected state.";

/// Lifecycle of the session currently shown in the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// How a session task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every city was searched
    Completed { rows: usize },
    /// Stopped by the operator; rows gathered so far stay in the view
    Cancelled { rows: usize },
    /// A newer session took over the view
    Superseded,
    /// The selected state has no cities to search
    NoCities,
}

/// Snapshot of the orchestrator's live state, as a UI would render it.
#[derive(Debug, Clone, Default)]
pub struct SearchView {
    pub session_id: u64,
    pub status: SessionStatus,
    pub state_name: String,
    pub rows: Vec<NormalizedRow>,
    pub current_city: Option<String>,
    pub cities_done: usize,
    pub total_cities: usize,
    pub message: String,
}

impl SearchView {
    /// Share of cities processed, 0-100.
    pub fn progress(&self) -> f64 {
        if self.total_cities == 0 {
            return 0.0;
        }
        self.cities_done as f64 / self.total_cities as f64 * 100.0
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }
}

/// Handle to a started session.
pub struct SessionHandle {
    pub id: u64,
    task: JoinHandle<SessionOutcome>,
}

impl SessionHandle {
    /// Wait for the session task to finish.
    pub async fn wait(self) -> Result<SessionOutcome> {
        Ok(self.task.await?)
    }
}

/// Fans a state-wide search out over cities, one sub-query at a time.
pub struct SearchOrchestrator {
    backend: Arc<dyn SearchBackend>,
    directory: Arc<CityDirectory>,
    next_session: AtomicU64,
    active: Mutex<CancellationToken>,
    view: Arc<watch::Sender<SearchView>>,
}

impl SearchOrchestrator {
    pub fn new(backend: Arc<dyn SearchBackend>, directory: Arc<CityDirectory>) -> Self {
        let (view, _) = watch::channel(SearchView::default());
        Self {
            backend,
            directory,
            next_session: AtomicU64::new(0),
            active: Mutex::new(CancellationToken::new()),
            view: Arc::new(view),
        }
    }

    /// Start a new session, superseding any running one.
    ///
    /// Invalid criteria fail here, before any request is made. Must be called
    /// from within a tokio runtime.
    pub fn start(&self, criteria: SearchCriteria) -> Result<SessionHandle> {
        if !criteria.is_valid() {
            return Err(ClientError::Validation);
        }

        let id = self.next_session.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();
        {
            let mut active = self
                .active
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let previous = std::mem::replace(&mut *active, token.clone());
            previous.cancel();
        }

        let entry = self.directory.get(&criteria.state_name).cloned();
        let total_cities = entry.as_ref().map_or(0, |e| e.cities.len());

        self.view.send_modify(|view| {
            *view = SearchView {
                session_id: id,
                status: SessionStatus::Running,
                state_name: criteria.state_name.clone(),
                total_cities,
                ..Default::default()
            };
        });

        info!(session = id, state = %criteria.state_name, total_cities, "Search session started");

        let session = Session {
            id,
            token,
            backend: self.backend.clone(),
            view: self.view.clone(),
        };
        let task = tokio::spawn(session.run(criteria, entry));

        Ok(SessionHandle { id, task })
    }

    /// Start a session and wait for it to end.
    pub async fn run(&self, criteria: SearchCriteria) -> Result<SessionOutcome> {
        self.start(criteria)?.wait().await
    }

    /// Stop the running session after its current city.
    ///
    /// Rows already gathered stay in the view. Returns `false` when nothing
    /// was running.
    pub fn cancel(&self) -> bool {
        self.active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .cancel();

        self.view.send_if_modified(|view| {
            if view.status != SessionStatus::Running {
                return false;
            }
            view.status = SessionStatus::Cancelled;
            view.current_city = None;
            view.message = format!("Search stopped by user. {} results found.", view.rows.len());
            true
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.view.subscribe()
    }

    pub fn snapshot(&self) -> SearchView {
        self.view.borrow().clone()
    }

    /// Id of the session that currently owns the view.
    pub fn current_session(&self) -> u64 {
        self.view.borrow().session_id
    }

    pub fn directory(&self) -> &CityDirectory {
        &self.directory
    }
}

/// One running session. Owns its id and cancellation token; every view
/// update goes through [`Session::apply`].
struct Session {
    id: u64,
    token: CancellationToken,
    backend: Arc<dyn SearchBackend>,
    view: Arc<watch::Sender<SearchView>>,
}

impl Session {
    async fn run(self, criteria: SearchCriteria, entry: Option<StateEntry>) -> SessionOutcome {
        let entry = match entry.filter(|e| !e.cities.is_empty()) {
            Some(entry) => entry,
            None => {
                self.apply(|view| {
                    view.status = SessionStatus::Completed;
                    view.message = NO_CITIES_MESSAGE.to_string();
                });
                return SessionOutcome::NoCities;
            }
        };

        for (index, city) in entry.cities.iter().enumerate() {
            if let Some(outcome) = self.interrupted() {
                return outcome;
            }

            info!(session = self.id, "Executing {} on {}", criteria.state_name, city);
            self.apply(|view| view.current_city = Some(city.clone()));

            let query = SubQuery::new(&criteria, city, &entry.code);
            let rows = tokio::select! {
                biased;
                _ = self.token.cancelled() => {
                    debug!(session = self.id, city = %city, "In-flight sub-query abandoned");
                    return self.interrupted().unwrap_or(SessionOutcome::Superseded);
                }
                result = self.backend.search(&query) => match result {
                    Ok(rows) => rows,
                    Err(e) => {
                        warn!(session = self.id, city = %city, error = %e, "Sub-query failed, skipping city");
                        Vec::new()
                    }
                },
            };

            let found = rows.len();
            let applied = self.apply(|view| {
                view.rows.extend(rows);
                view.cities_done = index + 1;
                view.message = format!("{} results found so far.", view.rows.len());
            });
            if !applied {
                return self.interrupted().unwrap_or(SessionOutcome::Superseded);
            }
            debug!(session = self.id, city = %city, found, "City complete");
        }

        let mut total = 0;
        let applied = self.apply(|view| {
            view.status = SessionStatus::Completed;
            view.current_city = None;
            view.message = format!("{} total results found.", view.rows.len());
            total = view.rows.len();
        });
        if !applied {
            return self.interrupted().unwrap_or(SessionOutcome::Superseded);
        }

        info!(session = self.id, total, "Search session completed");
        SessionOutcome::Completed { rows: total }
    }

    /// Apply `update` only while this session still owns a running view.
    fn apply(&self, update: impl FnOnce(&mut SearchView)) -> bool {
        self.view.send_if_modified(|view| {
            if view.session_id != self.id || view.status != SessionStatus::Running {
                return false;
            }
            update(view);
            true
        })
    }

    /// Why this session must stop, if it must.
    fn interrupted(&self) -> Option<SessionOutcome> {
        let view = self.view.borrow();
        if view.session_id != self.id {
            return Some(SessionOutcome::Superseded);
        }
        if self.token.is_cancelled() || view.status == SessionStatus::Cancelled {
            return Some(SessionOutcome::Cancelled {
                rows: view.rows.len(),
            });
        }
        None
    }
}
