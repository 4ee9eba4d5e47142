//! External bridge plumbing.
//!
//! Everything that talks to the `aptshelf-bridge` command lives here: the
//! catalog query runner, the privileged refresh runner, repository
//! enumeration, the wire payload types, and the error taxonomy all other
//! modules consume. Nothing in this module retries or touches shared state.

pub mod error;
pub mod payload;
pub mod query;
pub mod refresh;
pub mod repos;

pub use error::BridgeError;

/// Bridge command looked up in `PATH` when the settings file names none.
pub const DEFAULT_BRIDGE_COMMAND: &str = "aptshelf-bridge";

/// What: Verify the configured bridge command is reachable.
///
/// Inputs: `command` bridge name or path from settings.
///
/// Output: Resolved absolute path.
///
/// # Errors
/// - `Exec` when the command is not present in `PATH`.
///
/// Details:
/// - Called once at startup for an early, clear diagnostic; the runners
///   still invoke the command by its configured name afterwards.
pub fn resolve_command(command: &str) -> Result<std::path::PathBuf, BridgeError> {
    which::which(command)
        .map_err(|e| BridgeError::Exec(format!("bridge command {command} not found: {e}")))
}
