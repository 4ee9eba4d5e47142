//! Small helpers shared by the CLI entry path.

use super::definition::Args;

/// What: Resolve the effective logging level from CLI flags.
///
/// Inputs:
/// - `args`: Parsed arguments; `--verbose` wins over `--log-level`.
///
/// Output:
/// - A level string accepted by the tracing env filter; unknown values
///   fall back to `info`.
#[must_use]
pub fn determine_log_level(args: &Args) -> &'static str {
    if args.verbose {
        return "debug";
    }
    match args.log_level.to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    }
}
