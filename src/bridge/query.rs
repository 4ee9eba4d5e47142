//! Catalog query execution against the bridge command.

use tokio::process::Command;

use crate::bridge::BridgeError;
use crate::bridge::payload::ListReply;
use crate::state::{CatalogSnapshot, FilterParams};

/// What: Encode a [`FilterParams`] as `list` subcommand arguments.
///
/// Inputs:
/// - `params`: Query descriptor produced by the filter parameter builder.
///
/// Output:
/// - Argument vector for the bridge, `list` first.
///
/// Details:
/// - The builder guarantees search and tab restriction never coexist, so
///   the encoding needs no precedence rule between them.
#[must_use]
pub fn build_list_args(params: &FilterParams) -> Vec<String> {
    let mut args = vec!["list".to_string()];
    if let Some(repo) = &params.repository {
        args.push("--repo".to_string());
        args.push(repo.clone());
    }
    if let Some(tab) = params.tab {
        args.push("--filter".to_string());
        args.push(tab.as_arg().to_string());
    }
    if let Some(search) = &params.search {
        args.push("--search".to_string());
        args.push(search.clone());
    }
    args.push("--limit".to_string());
    args.push(params.limit.to_string());
    args
}

/// What: Run one catalog query and parse the reply.
///
/// Inputs:
/// - `bridge`: Bridge command name or path.
/// - `params`: Query descriptor to encode.
///
/// Output:
/// - Parsed [`CatalogSnapshot`] or a classified [`BridgeError`].
///
/// # Errors
/// - `Exec` when the command cannot be spawned.
/// - The classified failure when the bridge exits non-zero.
/// - `Parse` when stdout is not the documented JSON document.
///
/// Details:
/// - Never retries; retry policy lives with the refresh coordinator.
pub async fn run_list(
    bridge: &str,
    params: &FilterParams,
) -> Result<CatalogSnapshot, BridgeError> {
    let args = build_list_args(params);
    tracing::debug!(command = bridge, args = ?args, "[Bridge] running catalog query");
    let output = Command::new(bridge)
        .args(&args)
        .output()
        .await
        .map_err(|e| BridgeError::Exec(format!("failed to run {bridge}: {e}")))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        return Err(BridgeError::classify(&stderr, &stdout, output.status.code()));
    }
    let reply: ListReply = serde_json::from_slice(&output.stdout)
        .map_err(|e| BridgeError::Parse(format!("list reply is not valid JSON: {e}")))?;
    Ok(reply.into())
}
