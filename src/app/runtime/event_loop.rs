//! The serialized event loop.

use tokio::select;

use crate::state::AppState;

use super::channels::Channels;
use super::handlers;

/// What: Process one message from any channel.
///
/// Inputs:
/// - `app`: Application state
/// - `channels`: Communication channels for workers and UI intents
///
/// Output: `true` if the event loop should exit, `false` to continue.
///
/// Details:
/// - All state mutation funnels through this single await point, which is
///   what serializes handler re-entry without locks.
pub async fn process_channel_messages(app: &mut AppState, channels: &mut Channels) -> bool {
    select! {
        Some(intent) = channels.intent_rx.recv() => {
            handlers::handle_intent(app, intent, &channels.query_req_tx, &channels.refresh_req_tx)
        }
        Some(outcome) = channels.query_res_rx.recv() => {
            handlers::handle_query_outcome(app, outcome, &channels.refresh_req_tx);
            false
        }
        Some(outcome) = channels.refresh_res_rx.recv() => {
            handlers::handle_refresh_outcome(app, outcome, &channels.query_req_tx);
            false
        }
        Some(repos) = channels.repos_rx.recv() => {
            handlers::handle_repo_list(app, repos);
            false
        }
        else => true,
    }
}

/// What: Run the event loop until quit or, in one-shot mode, until settled.
///
/// Inputs:
/// - `app`: Application state
/// - `channels`: Communication channels
///
/// Details:
/// - With `exit_when_idle` set the loop ends once no query or refresh is
///   pending and a terminal outcome has been published, which is how the
///   command-line front end knows the session is printable.
pub async fn run_event_loop(app: &mut AppState, channels: &mut Channels) {
    loop {
        if process_channel_messages(app, channels).await {
            break;
        }
        if app.exit_when_idle && app.settled() {
            break;
        }
    }
}
