//! Repository enumeration result handling.

use crate::state::{AppState, RepoListOutcome};

/// What: Record the once-per-session repository enumeration.
///
/// Inputs:
/// - `app`: Application state
/// - `outcome`: Enumeration result from the startup worker
///
/// Details:
/// - Failure is not fatal; browsing continues without repository labels
///   and the problem is kept as a session notice.
pub fn handle_repo_list(app: &mut AppState, outcome: RepoListOutcome) {
    match outcome.result {
        Ok(repositories) => {
            tracing::info!(count = repositories.len(), "[Repos] repositories enumerated");
            app.repositories = repositories;
        }
        Err(err) => {
            tracing::warn!(kind = err.kind(), error = %err, "[Repos] repository enumeration failed");
            app.notices.push(format!("repository listing unavailable: {err}"));
        }
    }
}
