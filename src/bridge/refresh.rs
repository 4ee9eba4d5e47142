//! Privileged package-list refresh through `pkexec`.

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;

use crate::bridge::BridgeError;
use crate::bridge::payload::{ProgressLine, UpdateResult, WireError};

/// One decoded line of the update stream.
#[derive(Debug)]
pub enum UpdateLine {
    /// Intermediate progress report.
    Progress(ProgressLine),
    /// Terminal success/failure marker.
    Result(UpdateResult),
    /// Error object emitted mid-stream.
    Error(WireError),
    /// Anything else; ignored beyond heuristics on failure.
    Other,
}

/// What: Decode one stream line of `aptshelf-bridge update`.
///
/// Inputs: `line` raw stdout line.
///
/// Output: The decoded shape; non-JSON or unrecognized lines map to
/// [`UpdateLine::Other`].
#[must_use]
pub fn parse_update_line(line: &str) -> UpdateLine {
    let trimmed = line.trim();
    if !trimmed.starts_with('{') {
        return UpdateLine::Other;
    }
    if let Ok(result) = serde_json::from_str::<UpdateResult>(trimmed) {
        return UpdateLine::Result(result);
    }
    if let Ok(progress) = serde_json::from_str::<ProgressLine>(trimmed)
        && progress.kind == "progress"
    {
        return UpdateLine::Progress(progress);
    }
    if let Ok(wire) = serde_json::from_str::<WireError>(trimmed) {
        return UpdateLine::Error(wire);
    }
    UpdateLine::Other
}

/// What: Run the privileged list refresh and wait for its completion.
///
/// Inputs:
/// - `bridge`: Bridge command name or path, invoked under `pkexec`.
///
/// Output:
/// - Final bridge message on success or a classified [`BridgeError`].
///
/// # Errors
/// - `Exec` when `pkexec` is unavailable or the process cannot be spawned.
/// - `PermissionDenied` when authorization is dismissed or not granted.
/// - The wire error's classification when the bridge reports one.
///
/// Details:
/// - Progress lines are forwarded to the log and otherwise ignored; the
///   caller only learns about success or failure.
/// - The core imposes no timeout of its own; the bridge owns the time
///   bound and reports `TIMEOUT`.
pub async fn run_update(bridge: &str) -> Result<String, BridgeError> {
    let pkexec = which::which("pkexec")
        .map_err(|e| BridgeError::Exec(format!("pkexec is not available: {e}")))?;
    tracing::info!(command = bridge, "[Refresh] starting privileged list refresh");
    let mut child = Command::new(pkexec)
        .arg(bridge)
        .arg("update")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| BridgeError::Exec(format!("failed to run pkexec {bridge}: {e}")))?;

    // Drain stderr concurrently so a chatty process cannot deadlock on a
    // full pipe while we read stdout.
    let stderr_task = child.stderr.take().map(|mut err| {
        tokio::spawn(async move {
            let mut buf = String::new();
            let _ = err.read_to_string(&mut buf).await;
            buf
        })
    });

    let mut final_result: Option<UpdateResult> = None;
    let mut stream_error: Option<WireError> = None;
    let mut raw_lines: Vec<String> = Vec::new();
    if let Some(out) = child.stdout.take() {
        let mut lines = BufReader::new(out).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_update_line(&line) {
                UpdateLine::Progress(p) => {
                    tracing::debug!(
                        percentage = p.percentage,
                        message = %p.message,
                        "[Refresh] progress"
                    );
                }
                UpdateLine::Result(r) => final_result = Some(r),
                UpdateLine::Error(w) => stream_error = Some(w),
                UpdateLine::Other => {}
            }
            raw_lines.push(line);
        }
    }

    let status = child
        .wait()
        .await
        .map_err(|e| BridgeError::Exec(format!("failed to wait for pkexec {bridge}: {e}")))?;
    let stderr_text = match stderr_task {
        Some(task) => task.await.unwrap_or_default(),
        None => String::new(),
    };

    if let Some(wire) = stream_error {
        return Err(BridgeError::from_wire(&wire));
    }
    if !status.success() {
        return Err(BridgeError::classify(
            &stderr_text,
            &raw_lines.join("\n"),
            status.code(),
        ));
    }
    match final_result {
        Some(r) if r.success => Ok(r.message),
        Some(r) => Err(BridgeError::Unknown(if r.message.is_empty() {
            "refresh reported failure".to_string()
        } else {
            r.message
        })),
        None => Ok("package lists updated".to_string()),
    }
}
