//! Background worker for catalog queries.

use tokio::sync::mpsc;

use crate::state::{QueryOutcome, QueryRequest};

/// What: Spawn the background worker executing catalog queries.
///
/// Inputs:
/// - `req_rx`: Channel receiver for query requests
/// - `res_tx`: Channel sender for query outcomes
/// - `bridge`: Bridge command name or path
///
/// Details:
/// - Each request runs in its own task so overlapping queries genuinely
///   overlap; ordering is restored by the token check on the receiving
///   side, never here.
/// - Superseded requests are not aborted; their outcomes are sent and
///   discarded by the catalog handler.
pub fn spawn_query_worker(
    mut req_rx: mpsc::UnboundedReceiver<QueryRequest>,
    res_tx: mpsc::UnboundedSender<QueryOutcome>,
    bridge: String,
) {
    tokio::spawn(async move {
        while let Some(req) = req_rx.recv().await {
            let tx = res_tx.clone();
            let bridge = bridge.clone();
            tokio::spawn(async move {
                let result = crate::bridge::query::run_list(&bridge, &req.params).await;
                let _ = tx.send(QueryOutcome { id: req.id, result });
            });
        }
    });
}
