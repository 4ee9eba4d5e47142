//! Session construction: preferences, stores, and startup selections.

use std::path::PathBuf;

use crate::prefs::{self, save};
use crate::state::{AppState, Tab};
use crate::stores;

/// Startup configuration of one session, typically derived from the CLI.
#[derive(Clone, Debug, Default)]
pub struct SessionOptions {
    /// Configuration directory override.
    pub config_dir: Option<PathBuf>,
    /// Repository selection override.
    pub repository: Option<String>,
    /// Tab selection override.
    pub tab: Option<Tab>,
    /// Search text override.
    pub search: Option<String>,
    /// Store selection override.
    pub store: Option<String>,
    /// Session result limit override; never persisted.
    pub limit: Option<usize>,
    /// Force a list refresh before the first query settles.
    pub force_refresh: bool,
    /// Exit the event loop once the session is settled (one-shot mode).
    pub exit_when_idle: bool,
}

/// What: Build the initial application state for a session.
///
/// Inputs:
/// - `options`: Startup overrides.
///
/// Output:
/// - State seeded from persisted preferences and store configuration,
///   with startup selections applied on top.
///
/// Details:
/// - Selection overrides travel the same persistence path as interactive
///   selections, so the next session starts where this one was pointed.
/// - Store diagnostics become session notices; a broken store definition
///   degrades the session instead of aborting it.
pub fn init_app(options: &SessionOptions) -> AppState {
    let config_dir = options
        .config_dir
        .clone()
        .unwrap_or_else(prefs::paths::default_config_dir);
    let loaded = prefs::load(&config_dir);
    let (store_list, diagnostics) = stores::load_stores(&prefs::paths::stores_path(&config_dir));
    for diagnostic in &diagnostics {
        tracing::warn!(message = %diagnostic, "[Init] store configuration problem");
    }

    let mut app = AppState {
        config_dir,
        bridge_command: loaded.bridge_command,
        repository: loaded.repository,
        tab: loaded.tab,
        search: loaded.search,
        limit: loaded.result_limit,
        stores: store_list,
        notices: diagnostics,
        exit_when_idle: options.exit_when_idle,
        ..AppState::default()
    };

    if let Some(repository) = &options.repository {
        let repository = repository.trim();
        app.repository = if repository.is_empty() {
            None
        } else {
            Some(repository.to_string())
        };
        save::save_repository(&app.config_dir, app.repository.as_deref());
    }
    if let Some(tab) = options.tab {
        app.tab = tab;
        save::save_tab(&app.config_dir, tab);
    }
    if let Some(search) = &options.search {
        app.search = search.clone();
        save::save_search(&app.config_dir, search);
    }
    if let Some(store) = &options.store {
        if app.store_by_id(store).is_some() {
            app.active_store = Some(store.clone());
        } else {
            tracing::warn!(store = %store, "[Init] requested store is not configured");
            app.notices.push(format!("store '{store}' is not configured"));
        }
    }
    if let Some(limit) = options.limit
        && limit > 0
    {
        app.limit = limit;
    }

    tracing::info!(
        repository = ?app.repository,
        tab = app.tab.as_config_key(),
        search = %app.search,
        store = ?app.active_store,
        limit = app.limit,
        "[Init] session state prepared"
    );
    app
}
