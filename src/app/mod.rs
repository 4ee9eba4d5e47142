//! Session runner tying the runtime to the command-line front end.

pub mod runtime;

use crate::state::AppState;

/// Convenience result alias for session-level failures.
type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Run one browsing session to completion.
///
/// Inputs:
/// - `options`: Startup configuration, usually derived from the CLI.
///
/// Output:
/// - `Ok(())` once the session settled and was rendered; an error when the
///   initial catalog could never be produced.
///
/// # Errors
/// - The classified bridge error when no snapshot was ever accepted.
///
/// Details:
/// - Wires channels and workers, optionally forces a refresh, issues the
///   initial query, then hands control to the event loop. In one-shot mode
///   the loop ends when the session settles and the catalog is printed.
pub async fn run(options: &runtime::SessionOptions) -> Result<()> {
    let mut app = runtime::init_app(options);
    match crate::bridge::resolve_command(&app.bridge_command) {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "[App] bridge command resolved");
        }
        Err(err) => {
            tracing::warn!(error = %err, "[App] bridge command not found, queries will fail");
        }
    }

    let mut channels = runtime::Channels::new(&app.bridge_command);
    if options.force_refresh {
        runtime::handlers::request_refresh(&mut app, &channels.refresh_req_tx);
    }
    crate::logic::send_query(&mut app, &channels.query_req_tx);
    runtime::event_loop::run_event_loop(&mut app, &mut channels).await;

    print_session(&app);
    if app.snapshot.is_none()
        && let Some(err) = &app.query_error
    {
        return Err(Box::new(err.clone()));
    }
    Ok(())
}

/// What: Print the settled session to stdout/stderr.
///
/// Details:
/// - Errors and notices go to stderr so the package listing stays pipeable.
/// - A failed query never hides a previously accepted snapshot; both are
///   shown, matching the dismissible-notice behavior of a full UI.
fn print_session(app: &AppState) {
    for notice in &app.notices {
        eprintln!("notice: {notice}");
    }
    if let Some(err) = &app.refresh_error {
        eprintln!("refresh failed: {err}");
    }
    if let Some(err) = &app.query_error {
        eprintln!("query failed: {err}");
        if app.snapshot.is_some() {
            eprintln!("showing the last completed result");
        }
    }
    let Some(snapshot) = &app.snapshot else {
        return;
    };

    let repository = app.repository_label().unwrap_or("all repositories");
    let mut header = format!("{} | {}", repository, app.tab.as_config_key());
    if !app.search.trim().is_empty() {
        header.push_str(&format!(" | search: {}", app.search.trim()));
    }
    if let Some(store) = app.active_store() {
        header.push_str(&format!(" | store: {}", store.display_name()));
    }
    println!("{header}");
    println!(
        "{} of {} packages{}",
        app.visible.len(),
        snapshot.total_count,
        if snapshot.truncated { " (truncated)" } else { "" }
    );
    for package in &app.visible {
        let marker = if package.upgradable == Some(true) {
            'u'
        } else if package.installed {
            'i'
        } else {
            ' '
        };
        println!("{marker} {} {} - {}", package.name, package.version, package.summary);
    }
}
