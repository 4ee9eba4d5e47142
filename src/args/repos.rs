//! Command-line repository listing.

use std::path::Path;

/// What: Handle `--list-repos` by enumerating repositories and exiting.
///
/// Inputs:
/// - `config_dir`: Resolved configuration directory (for the bridge name).
///
/// Output:
/// - Exits the process after printing one `id<TAB>label` line per
///   repository; exit code 1 when the bridge call fails.
///
/// Details:
/// - Runs before the async runtime starts, so it uses the blocking
///   enumeration variant.
pub fn handle_list_repos(config_dir: &Path) -> ! {
    let prefs = crate::prefs::load(config_dir);
    tracing::info!(bridge = %prefs.bridge_command, "Repository listing requested from CLI");
    match crate::bridge::repos::run_repositories_blocking(&prefs.bridge_command) {
        Ok(repositories) => {
            for repository in repositories {
                println!("{}\t{}", repository.id, repository.label);
            }
            std::process::exit(0);
        }
        Err(err) => {
            eprintln!("repository listing failed: {err}");
            tracing::error!(kind = err.kind(), error = %err, "Repository listing failed");
            std::process::exit(1);
        }
    }
}
