//! Repository enumeration through the bridge.

use tokio::process::Command;

use crate::bridge::BridgeError;
use crate::state::Repository;

/// What: Enumerate the configured origin repositories.
///
/// Inputs: `bridge` command name or path.
///
/// Output: Repository records in bridge order.
///
/// # Errors
/// - `Exec` when the command cannot be spawned.
/// - The classified failure when the bridge exits non-zero.
/// - `Parse` when stdout is not a JSON repository array.
pub async fn run_repositories(bridge: &str) -> Result<Vec<Repository>, BridgeError> {
    let output = Command::new(bridge)
        .arg("repositories")
        .output()
        .await
        .map_err(|e| BridgeError::Exec(format!("failed to run {bridge}: {e}")))?;
    parse_repositories_output(&output.stdout, &output.stderr, output.status.code(), output.status.success())
}

/// What: Enumerate repositories synchronously for one-shot CLI use.
///
/// Inputs: `bridge` command name or path.
///
/// Output: Repository records in bridge order.
///
/// # Errors
/// - Same classification as [`run_repositories`].
///
/// Details:
/// - Used by the `--list-repos` flag, which exits before the async runtime
///   is ever started.
pub fn run_repositories_blocking(bridge: &str) -> Result<Vec<Repository>, BridgeError> {
    let output = std::process::Command::new(bridge)
        .arg("repositories")
        .stdin(std::process::Stdio::null())
        .output()
        .map_err(|e| BridgeError::Exec(format!("failed to run {bridge}: {e}")))?;
    parse_repositories_output(&output.stdout, &output.stderr, output.status.code(), output.status.success())
}

/// Shared decode path of both enumeration variants.
fn parse_repositories_output(
    stdout: &[u8],
    stderr: &[u8],
    exit_code: Option<i32>,
    success: bool,
) -> Result<Vec<Repository>, BridgeError> {
    if !success {
        return Err(BridgeError::classify(
            &String::from_utf8_lossy(stderr),
            &String::from_utf8_lossy(stdout),
            exit_code,
        ));
    }
    serde_json::from_slice(stdout)
        .map_err(|e| BridgeError::Parse(format!("repository reply is not valid JSON: {e}")))
}
