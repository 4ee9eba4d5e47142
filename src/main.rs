//! aptshelf binary entrypoint kept minimal. The full runtime lives in `app`.

use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use aptshelf::{app, args, prefs};

/// Timestamp formatter for the session log file.
struct ShelfTimer;

impl tracing_subscriber::fmt::time::FormatTime for ShelfTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S");
        w.write_str(&ts.to_string())
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing to `logs/aptshelf.log` under the config dir.
///
/// Details:
/// - Falls back to a stderr logger when the log file cannot be opened, so
///   startup never blocks on logging.
fn init_logging(config_dir: &std::path::Path, level: &str) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string()))
    };
    let mut log_path = prefs::paths::logs_dir(config_dir);
    log_path.push("aptshelf.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(ShelfTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_timer(ShelfTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = args::process_args();
    let config_dir = cli
        .config_dir
        .clone()
        .map_or_else(prefs::paths::default_config_dir, PathBuf::from);
    init_logging(&config_dir, args::determine_log_level(&cli));

    if cli.list_repos {
        args::repos::handle_list_repos(&config_dir);
    }

    let options = match cli.session_options() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };
    tracing::info!(refresh = options.force_refresh, "aptshelf starting");
    if let Err(err) = app::run(&options).await {
        tracing::error!(error = %err, "Application error");
        std::process::exit(1);
    }
    tracing::info!("aptshelf exited");
}
