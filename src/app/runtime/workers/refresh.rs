//! Background worker for privileged list refreshes.

use tokio::sync::mpsc;

use crate::state::{RefreshOutcome, RefreshRequest};

/// What: Spawn the background worker executing list refreshes.
///
/// Inputs:
/// - `req_rx`: Channel receiver for refresh requests
/// - `res_tx`: Channel sender for refresh outcomes
/// - `bridge`: Bridge command name or path
///
/// Details:
/// - Requests run strictly one at a time; the single-flight guard on the
///   state side already coalesces concurrent demand, this worker is the
///   second line keeping privileged operations serial.
pub fn spawn_refresh_worker(
    mut req_rx: mpsc::UnboundedReceiver<RefreshRequest>,
    res_tx: mpsc::UnboundedSender<RefreshOutcome>,
    bridge: String,
) {
    tokio::spawn(async move {
        while let Some(RefreshRequest) = req_rx.recv().await {
            let result = crate::bridge::refresh::run_update(&bridge).await;
            let _ = res_tx.send(RefreshOutcome { result });
        }
    });
}
