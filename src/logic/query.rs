//! Query issuance: the producing half of the request sequencer.

use tokio::sync::mpsc;

use crate::logic::filter::{FilterOverrides, build_filter_params};
use crate::state::{AppState, QueryRequest};

/// What: Issue a catalog query for the ambient selection with a fresh token.
///
/// Inputs:
/// - `app`: Mutable application state; updates `next_query_id` and `latest_query_id`
/// - `query_tx`: Channel to the query worker
///
/// Details:
/// - The token allows correlating responses so the catalog handler can
///   discard stale results and stale errors alike.
pub fn send_query(app: &mut AppState, query_tx: &mpsc::UnboundedSender<QueryRequest>) {
    send_query_with(app, query_tx, &FilterOverrides::default());
}

/// What: Issue a catalog query with per-call filter overrides.
///
/// Inputs:
/// - `app`: Mutable application state.
/// - `query_tx`: Channel to the query worker.
/// - `overrides`: Field-by-field replacements over the ambient selection.
///
/// Details:
/// - Issuance marks the loading state and clears the previous query error;
///   only acceptance or failure of this token clears the loading state.
pub fn send_query_with(
    app: &mut AppState,
    query_tx: &mpsc::UnboundedSender<QueryRequest>,
    overrides: &FilterOverrides,
) {
    let params = build_filter_params(app, overrides);
    let id = app.next_query_id;
    app.next_query_id += 1;
    app.latest_query_id = id;
    app.loading = true;
    app.query_error = None;
    tracing::debug!(id, params = ?params, "[Query] issuing catalog query");
    let _ = query_tx.send(QueryRequest { id, params });
}
