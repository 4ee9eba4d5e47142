//! Intent handling: the only entry point for UI-driven state changes.

use tokio::sync::mpsc;

use crate::prefs::save;
use crate::state::{AppState, Intent, QueryRequest, RefreshRequest, Tab};

/// What: Apply one UI intent to the state container.
///
/// Inputs:
/// - `app`: Application state
/// - `intent`: Selection change or command from a UI collaborator
/// - `query_req_tx`: Channel sender for catalog queries
/// - `refresh_req_tx`: Channel sender for refresh requests
///
/// Output: `true` when the event loop should exit, `false` to continue.
///
/// Details:
/// - Selection changes persist to the settings file and re-query; no-op
///   changes (same value again) neither persist nor query.
/// - Store selection only narrows the already accepted snapshot, so it
///   recomputes the visible list without touching the bridge.
pub fn handle_intent(
    app: &mut AppState,
    intent: Intent,
    query_req_tx: &mpsc::UnboundedSender<QueryRequest>,
    refresh_req_tx: &mpsc::UnboundedSender<RefreshRequest>,
) -> bool {
    match intent {
        Intent::SelectRepository(repository) => {
            if app.repository != repository {
                app.repository = repository;
                save::save_repository(&app.config_dir, app.repository.as_deref());
                crate::logic::send_query(app, query_req_tx);
            }
            false
        }
        Intent::SelectTab(tab) => {
            if app.tab != tab {
                app.tab = tab;
                save::save_tab(&app.config_dir, tab);
                crate::logic::send_query(app, query_req_tx);
            }
            false
        }
        Intent::SetSearch(text) => {
            if app.search != text {
                app.search = text;
                save::save_search(&app.config_dir, &app.search);
                // Restricted tabs never encode search text; the retained
                // string is applied when the available tab comes back.
                if app.tab == Tab::Available {
                    crate::logic::send_query(app, query_req_tx);
                }
            }
            false
        }
        Intent::SelectStore(store) => {
            if let Some(id) = store.as_deref()
                && app.store_by_id(id).is_none()
            {
                tracing::warn!(store = %id, "[Intent] ignoring unknown store selection");
                return false;
            }
            app.active_store = store;
            crate::logic::refresh_visible(app);
            false
        }
        Intent::Refresh => {
            super::refresh::request_refresh(app, refresh_req_tx);
            false
        }
        Intent::DismissQueryError => {
            app.query_error = None;
            false
        }
        Intent::DismissRefreshError => {
            app.refresh_error = None;
            false
        }
        Intent::Quit => true,
    }
}
