//! Refresh coordination: single-flight guard and completion handling.

use tokio::sync::mpsc;

use crate::state::{AppState, QueryRequest, RefreshOutcome, RefreshRequest};

/// What: Request a list refresh, coalescing with any running one.
///
/// Inputs:
/// - `app`: Application state carrying the single-flight guard
/// - `refresh_req_tx`: Channel sender for refresh requests
///
/// Details:
/// - A request while a refresh is already in flight is a no-op; manual and
///   automatic refreshes share this guard, so they can never duplicate.
pub fn request_refresh(app: &mut AppState, refresh_req_tx: &mpsc::UnboundedSender<RefreshRequest>) {
    if app.refresh_in_flight {
        tracing::debug!("[Refresh] refresh already in flight, coalescing request");
        return;
    }
    app.refresh_in_flight = true;
    app.refresh_error = None;
    let _ = refresh_req_tx.send(RefreshRequest);
}

/// What: Trigger an automatic refresh for an unpopulated catalog.
///
/// Inputs:
/// - `app`: Application state; the accepted snapshot has just been published
/// - `refresh_req_tx`: Channel sender for refresh requests
///
/// Details:
/// - Fires at most once per "lists never populated" observation window:
///   the attempt flag stays set until a populated snapshot is accepted, so
///   a backend that remains empty after a refresh is not hammered.
pub fn maybe_start_auto_refresh(
    app: &mut AppState,
    refresh_req_tx: &mpsc::UnboundedSender<RefreshRequest>,
) {
    let Some(snapshot) = &app.snapshot else {
        return;
    };
    if snapshot.lists_populated {
        return;
    }
    if app.refresh_in_flight {
        tracing::debug!("[Refresh] lists unpopulated but a refresh is already running");
        return;
    }
    if app.auto_refresh_attempted {
        tracing::warn!("[Refresh] lists still unpopulated after a refresh; not retrying automatically");
        return;
    }
    tracing::info!("[Refresh] package lists have never been populated, refreshing automatically");
    app.auto_refresh_attempted = true;
    request_refresh(app, refresh_req_tx);
}

/// What: Apply a refresh outcome and close the cycle.
///
/// Inputs:
/// - `app`: Application state
/// - `outcome`: Refresh completion from the worker
/// - `query_req_tx`: Channel sender for the follow-up catalog query
///
/// Details:
/// - The guard clears on success and failure alike.
/// - On success a brand-new query is issued with the ambient filter state
///   of this moment, not the state captured when the refresh began.
/// - On failure the error lands in the refresh slot, leaving any query
///   error and the last accepted snapshot untouched; there is no retry.
pub fn handle_refresh_outcome(
    app: &mut AppState,
    outcome: RefreshOutcome,
    query_req_tx: &mpsc::UnboundedSender<QueryRequest>,
) {
    app.refresh_in_flight = false;
    match outcome.result {
        Ok(message) => {
            tracing::info!(message = %message, "[Refresh] refresh completed, re-querying catalog");
            app.refresh_error = None;
            crate::logic::send_query(app, query_req_tx);
        }
        Err(err) => {
            tracing::warn!(kind = err.kind(), error = %err, "[Refresh] refresh failed");
            app.refresh_error = Some(err);
        }
    }
}
