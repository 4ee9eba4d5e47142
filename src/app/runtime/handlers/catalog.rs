//! Catalog response handling: the accepting half of the request sequencer.

use tokio::sync::mpsc;

use crate::state::{AppState, QueryOutcome, RefreshRequest};

/// What: Apply one query outcome to the state container.
///
/// Inputs:
/// - `app`: Application state
/// - `outcome`: Outcome correlated by token
/// - `refresh_req_tx`: Channel sender for refresh requests, used when an
///   accepted snapshot reveals unpopulated package lists
///
/// Details:
/// - A token older than `latest_query_id` means the request was superseded
///   while in flight; its result AND its error are discarded without any
///   state mutation, so a slow response can never clobber a fresher one.
/// - Acceptance replaces the snapshot wholesale, recomputes the visible
///   list, and lets the refresh coordinator inspect the result.
/// - Failure of the current token publishes the error and keeps the last
///   accepted snapshot untouched.
pub fn handle_query_outcome(
    app: &mut AppState,
    outcome: QueryOutcome,
    refresh_req_tx: &mpsc::UnboundedSender<RefreshRequest>,
) {
    if outcome.id != app.latest_query_id {
        tracing::debug!(
            id = outcome.id,
            latest = app.latest_query_id,
            "[Catalog] discarding superseded response"
        );
        return;
    }
    app.loading = false;
    match outcome.result {
        Ok(snapshot) => {
            tracing::info!(
                id = outcome.id,
                packages = snapshot.packages.len(),
                total = snapshot.total_count,
                truncated = snapshot.truncated,
                lists_populated = snapshot.lists_populated,
                "[Catalog] snapshot accepted"
            );
            app.query_error = None;
            if snapshot.lists_populated {
                app.auto_refresh_attempted = false;
            }
            app.snapshot = Some(snapshot);
            crate::logic::refresh_visible(app);
            super::refresh::maybe_start_auto_refresh(app, refresh_req_tx);
        }
        Err(err) => {
            tracing::warn!(
                id = outcome.id,
                kind = err.kind(),
                error = %err,
                "[Catalog] query failed"
            );
            app.query_error = Some(err);
        }
    }
}
