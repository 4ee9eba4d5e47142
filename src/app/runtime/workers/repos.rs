//! One-shot repository enumeration at session start.

use tokio::sync::mpsc;

use crate::state::RepoListOutcome;

/// What: Spawn the task enumerating repositories once.
///
/// Inputs:
/// - `res_tx`: Channel sender for the enumeration outcome
/// - `bridge`: Bridge command name or path
pub fn spawn_repos_worker(res_tx: mpsc::UnboundedSender<RepoListOutcome>, bridge: String) {
    tokio::spawn(async move {
        let result = crate::bridge::repos::run_repositories(&bridge).await;
        let _ = res_tx.send(RepoListOutcome { result });
    });
}
