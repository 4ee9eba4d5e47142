//! Classified bridge failures.
//!
//! Every failure mode of the external bridge is translated into one
//! [`BridgeError`] kind before it reaches the request sequencer, so the rest
//! of the core never inspects exit codes or raw stderr.

use crate::bridge::payload::WireError;

/// One classified failure of a bridge invocation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    /// The filter combination was malformed. Should not occur for queries
    /// built by this crate; surfaced verbatim when the bridge reports it.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    /// The bridge command could not be run or exited abnormally.
    #[error("bridge execution failed: {0}")]
    Exec(String),
    /// The bridge produced output that is not the documented JSON.
    #[error("unreadable bridge reply: {0}")]
    Parse(String),
    /// The bridge gave up after its own time bound.
    #[error("operation timed out: {0}")]
    Timeout(String),
    /// The privileged operation was not authorized.
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// Another privileged operation holds the package system lock.
    #[error("package system is locked: {0}")]
    Locked(String),
    /// Remote package metadata could not be reached.
    #[error("network failure: {0}")]
    Network(String),
    /// Anything the bridge reported that fits no other kind.
    #[error("{0}")]
    Unknown(String),
}

impl BridgeError {
    /// Short machine-readable kind name, used as a structured log field.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidQuery(_) => "invalid_query",
            Self::Exec(_) => "exec",
            Self::Parse(_) => "parse",
            Self::Timeout(_) => "timeout",
            Self::PermissionDenied(_) => "permission_denied",
            Self::Locked(_) => "locked",
            Self::Network(_) => "network",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Map a decoded bridge error object onto the taxonomy.
    ///
    /// Inputs: `err` wire error with message, machine code, and optional
    /// details.
    ///
    /// Output: the matching kind, with the human message preserved and the
    /// details appended when present.
    pub fn from_wire(err: &WireError) -> Self {
        let message = err.details.as_deref().map_or_else(
            || err.error.clone(),
            |details| format!("{} ({details})", err.error),
        );
        match err.code.as_str() {
            "INVALID_ARGUMENTS" | "INVALID_FILTER" | "UNKNOWN_COMMAND" => {
                Self::InvalidQuery(message)
            }
            "TIMEOUT" => Self::Timeout(message),
            "LOCKED" | "LOCK_TIMEOUT" => Self::Locked(message),
            "NETWORK_ERROR" => Self::Network(message),
            "PERMISSION_DENIED" | "NOT_AUTHORIZED" => Self::PermissionDenied(message),
            _ => Self::Unknown(message),
        }
    }

    /// Classify a failed bridge invocation from its observable output.
    ///
    /// Inputs:
    /// - `stderr`: captured stderr, expected to carry a JSON error object
    /// - `combined`: merged command output for plain-text heuristics
    /// - `exit_code`: process exit code when the process ran at all
    ///
    /// Details:
    /// - A decodable JSON error object wins over every heuristic.
    /// - `pkexec` reports dismissal and missing authorization as 126/127
    ///   without a JSON body, so those codes map before text matching.
    pub fn classify(stderr: &str, combined: &str, exit_code: Option<i32>) -> Self {
        for line in stderr.lines().rev() {
            let line = line.trim();
            if !line.starts_with('{') {
                continue;
            }
            if let Ok(wire) = serde_json::from_str::<WireError>(line) {
                return Self::from_wire(&wire);
            }
        }
        if let Ok(wire) = serde_json::from_str::<WireError>(stderr.trim()) {
            return Self::from_wire(&wire);
        }
        if matches!(exit_code, Some(126 | 127)) {
            return Self::PermissionDenied(
                "authorization was dismissed or not granted".to_string(),
            );
        }
        let haystack = format!("{stderr}\n{combined}").to_lowercase();
        if haystack.contains("could not resolve") {
            return Self::Network("unable to reach package repositories".to_string());
        }
        if haystack.contains("dpkg was interrupted") || haystack.contains("could not get lock") {
            return Self::Locked("another package operation is in progress".to_string());
        }
        if haystack.contains("not authorized") || haystack.contains("authentication") {
            return Self::PermissionDenied(first_line(stderr));
        }
        let detail = first_line(stderr);
        let detail = if detail.is_empty() {
            first_line(combined)
        } else {
            detail
        };
        Self::Exec(match exit_code {
            Some(code) => format!("exited with status {code}: {detail}"),
            None => format!("terminated by signal: {detail}"),
        })
    }
}

/// First non-empty line of command output, trimmed for display.
fn first_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default()
        .to_string()
}
