//! The single owned state container mutated by the runtime event loop.

use std::path::PathBuf;

use crate::bridge::BridgeError;
use crate::state::{CatalogSnapshot, Package, Repository, Tab};
use crate::stores::Store;

/// Mutable application state for one catalog-browsing session.
///
/// Exactly one instance exists per session. It is owned by the runtime and
/// mutated only through the serialized handler callbacks of the event loop;
/// workers and UI collaborators communicate with it over channels. The
/// `latest_query_id`/`next_query_id` pair implements the monotonic request
/// token that lets the catalog handler discard superseded responses.
#[derive(Debug)]
pub struct AppState {
    /// Resolved configuration directory for settings, stores, and logs.
    pub config_dir: PathBuf,
    /// Name or path of the bridge command used for all catalog operations.
    pub bridge_command: String,

    /// Active repository narrowing; `None` browses all repositories.
    pub repository: Option<String>,
    /// Active catalog tab.
    pub tab: Tab,
    /// Free-text search string as typed; applied only on the available tab.
    pub search: String,
    /// Active curated store id; `None` disables store narrowing.
    pub active_store: Option<String>,
    /// Result limit passed to the bridge.
    pub limit: usize,

    /// Token of the most recently issued catalog query.
    pub latest_query_id: u64,
    /// Next token to hand out.
    pub next_query_id: u64,
    /// True between query issuance and acceptance/failure of that query.
    pub loading: bool,

    /// Most recently accepted catalog snapshot, kept across later failures.
    pub snapshot: Option<CatalogSnapshot>,
    /// Store-narrowed, name-sorted view of the snapshot for display.
    pub visible: Vec<Package>,

    /// Error of the current query, cleared on the next issuance.
    pub query_error: Option<BridgeError>,
    /// Error of the last refresh attempt, tracked separately from queries.
    pub refresh_error: Option<BridgeError>,
    /// Single-flight guard: true while a refresh is running.
    pub refresh_in_flight: bool,
    /// True once an automatic refresh was triggered for the current
    /// "lists never populated" observation window; cleared when a snapshot
    /// with populated lists is accepted. Keeps a backend that stays empty
    /// after a refresh from re-triggering endlessly.
    pub auto_refresh_attempted: bool,

    /// Repositories enumerated at session start.
    pub repositories: Vec<Repository>,
    /// Valid stores loaded from configuration at session start.
    pub stores: Vec<Store>,
    /// Non-fatal startup diagnostics (e.g. rejected store definitions).
    pub notices: Vec<String>,

    /// When true the event loop exits once no query or refresh is pending.
    pub exit_when_idle: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            config_dir: crate::prefs::paths::default_config_dir(),
            bridge_command: crate::bridge::DEFAULT_BRIDGE_COMMAND.to_string(),
            repository: None,
            tab: Tab::Available,
            search: String::new(),
            active_store: None,
            limit: crate::prefs::DEFAULT_RESULT_LIMIT,
            latest_query_id: 0,
            next_query_id: 1,
            loading: false,
            snapshot: None,
            visible: Vec::new(),
            query_error: None,
            refresh_error: None,
            refresh_in_flight: false,
            auto_refresh_attempted: false,
            repositories: Vec::new(),
            stores: Vec::new(),
            notices: Vec::new(),
            exit_when_idle: false,
        }
    }
}

impl AppState {
    /// Look up a configured store by id.
    pub fn store_by_id(&self, id: &str) -> Option<&Store> {
        self.stores.iter().find(|s| s.id == id)
    }

    /// The currently active store, if the active id resolves to one.
    pub fn active_store(&self) -> Option<&Store> {
        self.active_store
            .as_deref()
            .and_then(|id| self.store_by_id(id))
    }

    /// Label of the active repository for display, falling back to its id.
    pub fn repository_label(&self) -> Option<&str> {
        let id = self.repository.as_deref()?;
        Some(
            self.repositories
                .iter()
                .find(|r| r.id == id)
                .map_or(id, |r| r.label.as_str()),
        )
    }

    /// Whether the initial query cycle has produced any terminal outcome.
    ///
    /// Used by the one-shot runner to decide when the session is settled:
    /// nothing loading, no refresh running, and either a snapshot or an
    /// error has been published.
    pub const fn settled(&self) -> bool {
        !self.loading
            && !self.refresh_in_flight
            && (self.snapshot.is_some()
                || self.query_error.is_some()
                || self.refresh_error.is_some())
    }
}
