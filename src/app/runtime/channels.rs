//! Channel definitions for runtime communication.

use tokio::sync::mpsc;

use crate::state::{
    Intent, QueryOutcome, QueryRequest, RefreshOutcome, RefreshRequest, RepoListOutcome,
};

use super::workers;

/// What: Channel endpoints connecting the event loop, its workers, and any
/// UI collaborator.
///
/// Details:
/// - The runtime owns every receiver; senders for requests are cloned into
///   handlers, and `intent_tx` is the public handle a UI submits through.
pub struct Channels {
    /// Handle for UI collaborators to submit intents.
    pub intent_tx: mpsc::UnboundedSender<Intent>,
    /// Intent stream consumed by the event loop.
    pub intent_rx: mpsc::UnboundedReceiver<Intent>,
    /// Catalog queries towards the query worker.
    pub query_req_tx: mpsc::UnboundedSender<QueryRequest>,
    /// Query outcomes back from the query worker.
    pub query_res_rx: mpsc::UnboundedReceiver<QueryOutcome>,
    /// Refresh requests towards the refresh worker.
    pub refresh_req_tx: mpsc::UnboundedSender<RefreshRequest>,
    /// Refresh outcomes back from the refresh worker.
    pub refresh_res_rx: mpsc::UnboundedReceiver<RefreshOutcome>,
    /// One-shot repository enumeration result.
    pub repos_rx: mpsc::UnboundedReceiver<RepoListOutcome>,
}

impl Channels {
    /// What: Create all channels and spawn the background workers.
    ///
    /// Inputs:
    /// - `bridge`: Bridge command name or path handed to every worker.
    ///
    /// Output:
    /// - A `Channels` value with all endpoints wired and workers running.
    #[must_use]
    pub fn new(bridge: &str) -> Self {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel::<Intent>();
        let (query_req_tx, query_req_rx) = mpsc::unbounded_channel::<QueryRequest>();
        let (query_res_tx, query_res_rx) = mpsc::unbounded_channel::<QueryOutcome>();
        let (refresh_req_tx, refresh_req_rx) = mpsc::unbounded_channel::<RefreshRequest>();
        let (refresh_res_tx, refresh_res_rx) = mpsc::unbounded_channel::<RefreshOutcome>();
        let (repos_tx, repos_rx) = mpsc::unbounded_channel::<RepoListOutcome>();

        workers::query::spawn_query_worker(query_req_rx, query_res_tx, bridge.to_string());
        workers::refresh::spawn_refresh_worker(refresh_req_rx, refresh_res_tx, bridge.to_string());
        workers::repos::spawn_repos_worker(repos_tx, bridge.to_string());

        Self {
            intent_tx,
            intent_rx,
            query_req_tx,
            query_res_rx,
            refresh_req_tx,
            refresh_res_rx,
            repos_rx,
        }
    }
}
