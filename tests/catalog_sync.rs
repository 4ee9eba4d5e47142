//! Cross-module scenarios for the catalog synchronization core.

use tokio::sync::mpsc;

use aptshelf::app::runtime::handlers;
use aptshelf::bridge::BridgeError;
use aptshelf::logic;
use aptshelf::state::{
    AppState, CatalogSnapshot, Intent, Package, QueryOutcome, RefreshOutcome, Tab, TabFilter,
};

fn package(name: &str, installed: bool) -> Package {
    Package {
        name: name.into(),
        version: "1.0".into(),
        installed,
        ..Package::default()
    }
}

fn snapshot(names: &[(&str, bool)]) -> CatalogSnapshot {
    CatalogSnapshot {
        packages: names.iter().map(|(n, i)| package(n, *i)).collect(),
        total_count: names.len(),
        lists_populated: true,
        ..CatalogSnapshot::default()
    }
}

fn test_app() -> (AppState, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = AppState {
        config_dir: dir.path().to_path_buf(),
        ..AppState::default()
    };
    (app, dir)
}

#[tokio::test]
/// What: Of N overlapping queries, only the final token may publish.
///
/// Inputs:
/// - Three queries issued back to back, responses applied in the arrival
///   order 3, 1, 2
///
/// Output:
/// - The snapshot published by token 3 survives both late arrivals
async fn overlapping_queries_only_final_token_publishes() {
    let (mut app, _dir) = test_app();
    let (query_tx, mut query_rx) = mpsc::unbounded_channel();
    let (refresh_tx, _refresh_rx) = mpsc::unbounded_channel();

    logic::send_query(&mut app, &query_tx);
    logic::send_query(&mut app, &query_tx);
    logic::send_query(&mut app, &query_tx);
    let ids: Vec<u64> = std::iter::from_fn(|| query_rx.try_recv().ok().map(|r| r.id)).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(app.latest_query_id, 3);

    handlers::handle_query_outcome(
        &mut app,
        QueryOutcome {
            id: 3,
            result: Ok(snapshot(&[("winner", false)])),
        },
        &refresh_tx,
    );
    handlers::handle_query_outcome(
        &mut app,
        QueryOutcome {
            id: 1,
            result: Ok(snapshot(&[("first", false)])),
        },
        &refresh_tx,
    );
    handlers::handle_query_outcome(
        &mut app,
        QueryOutcome {
            id: 2,
            result: Err(BridgeError::Timeout("slow second".into())),
        },
        &refresh_tx,
    );

    assert_eq!(app.visible.len(), 1);
    assert_eq!(app.visible[0].name, "winner");
    assert!(app.query_error.is_none(), "stale error must not surface");
    assert!(!app.loading);
}

#[tokio::test]
/// What: A slow search response cannot clobber a newer tab selection.
///
/// Inputs:
/// - Search "ngi" on the available tab, then a switch to the installed
///   tab; the installed result resolves first, the search result last
///
/// Output:
/// - Final state shows the installed packages, not "nginx"
async fn late_search_result_does_not_resurface() {
    let (mut app, _dir) = test_app();
    let (query_tx, mut query_rx) = mpsc::unbounded_channel();
    let (refresh_tx, _refresh_rx) = mpsc::unbounded_channel();

    handlers::handle_intent(&mut app, Intent::SetSearch("ngi".into()), &query_tx, &refresh_tx);
    let search_req = query_rx.try_recv().expect("search query issued");
    assert_eq!(search_req.params.search.as_deref(), Some("ngi"));

    handlers::handle_intent(&mut app, Intent::SelectTab(Tab::Installed), &query_tx, &refresh_tx);
    let installed_req = query_rx.try_recv().expect("installed query issued");
    assert_eq!(installed_req.params.tab, Some(TabFilter::Installed));
    assert_eq!(installed_req.params.search, None);

    // The second query resolves first.
    handlers::handle_query_outcome(
        &mut app,
        QueryOutcome {
            id: installed_req.id,
            result: Ok(snapshot(&[("curl", true), ("vim", true)])),
        },
        &refresh_tx,
    );
    // The slow search response arrives afterwards and must be discarded.
    handlers::handle_query_outcome(
        &mut app,
        QueryOutcome {
            id: search_req.id,
            result: Ok(snapshot(&[("nginx", false)])),
        },
        &refresh_tx,
    );

    let names: Vec<&str> = app.visible.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["curl", "vim"]);
}

#[tokio::test]
/// What: The empty-catalog cycle refreshes once and re-queries with the
/// ambient state at completion time.
///
/// Inputs:
/// - Initial query returns zero packages with unpopulated lists; the user
///   switches tabs while the refresh runs; the refresh then succeeds
///
/// Output:
/// - Exactly one refresh request; the re-query carries the new tab and a
///   fresh token; the late outcome of the tab switch is discarded
async fn empty_catalog_refresh_requeries_ambient_state() {
    let (mut app, _dir) = test_app();
    let (query_tx, mut query_rx) = mpsc::unbounded_channel();
    let (refresh_tx, mut refresh_rx) = mpsc::unbounded_channel();

    logic::send_query(&mut app, &query_tx);
    let initial = query_rx.try_recv().expect("initial query issued");

    let mut empty = snapshot(&[]);
    empty.lists_populated = false;
    handlers::handle_query_outcome(
        &mut app,
        QueryOutcome {
            id: initial.id,
            result: Ok(empty),
        },
        &refresh_tx,
    );
    assert!(refresh_rx.try_recv().is_ok(), "refresh must start automatically");
    assert!(refresh_rx.try_recv().is_err(), "exactly one refresh request");
    assert!(app.refresh_in_flight);

    // Selection changes while the refresh is in flight.
    handlers::handle_intent(&mut app, Intent::SelectTab(Tab::Upgradable), &query_tx, &refresh_tx);
    let tab_req = query_rx.try_recv().expect("tab switch queries");

    // A second empty observation while the refresh runs is a no-op.
    let mut still_empty = snapshot(&[]);
    still_empty.lists_populated = false;
    handlers::handle_query_outcome(
        &mut app,
        QueryOutcome {
            id: tab_req.id,
            result: Ok(still_empty),
        },
        &refresh_tx,
    );
    assert!(refresh_rx.try_recv().is_err(), "no duplicate refresh while in flight");

    handlers::handle_refresh_outcome(
        &mut app,
        RefreshOutcome {
            result: Ok("package lists updated".into()),
        },
        &query_tx,
    );
    let requery = query_rx.try_recv().expect("re-query issued after refresh");
    assert_eq!(requery.params.tab, Some(TabFilter::Upgradable));
    assert_eq!(requery.id, app.latest_query_id);
    assert!(query_rx.try_recv().is_err(), "exactly one re-query");

    handlers::handle_query_outcome(
        &mut app,
        QueryOutcome {
            id: requery.id,
            result: Ok(snapshot(&[("curl", true)])),
        },
        &refresh_tx,
    );
    assert_eq!(app.visible[0].name, "curl");
    assert!(app.settled());
}

#[tokio::test]
/// What: A failed refresh surfaces separately and keeps the catalog.
///
/// Inputs:
/// - Accepted snapshot, manual refresh intent, failing refresh outcome
///
/// Output:
/// - Snapshot and visible list unchanged; refresh error set; query error
///   stays empty; a later manual refresh is possible again
async fn failed_refresh_keeps_catalog_visible() {
    let (mut app, _dir) = test_app();
    let (query_tx, mut query_rx) = mpsc::unbounded_channel();
    let (refresh_tx, mut refresh_rx) = mpsc::unbounded_channel();

    logic::send_query(&mut app, &query_tx);
    let req = query_rx.try_recv().expect("query issued");
    handlers::handle_query_outcome(
        &mut app,
        QueryOutcome {
            id: req.id,
            result: Ok(snapshot(&[("nginx", false)])),
        },
        &refresh_tx,
    );

    handlers::handle_intent(&mut app, Intent::Refresh, &query_tx, &refresh_tx);
    assert!(refresh_rx.try_recv().is_ok());
    handlers::handle_refresh_outcome(
        &mut app,
        RefreshOutcome {
            result: Err(BridgeError::Network("mirrors unreachable".into())),
        },
        &query_tx,
    );

    assert_eq!(app.visible[0].name, "nginx");
    assert!(app.query_error.is_none());
    assert_eq!(app.refresh_error.as_ref().map(BridgeError::kind), Some("network"));
    assert!(query_rx.try_recv().is_err(), "failed refresh must not re-query");

    handlers::handle_intent(&mut app, Intent::DismissRefreshError, &query_tx, &refresh_tx);
    assert!(app.refresh_error.is_none());
    handlers::handle_intent(&mut app, Intent::Refresh, &query_tx, &refresh_tx);
    assert!(refresh_rx.try_recv().is_ok(), "guard cleared, refresh possible again");
}

#[tokio::test]
/// What: A one-shot session without a reachable bridge fails cleanly.
///
/// Inputs:
/// - Settings pointing at a bridge command that does not exist
///
/// Output:
/// - `app::run` settles and reports the classified execution failure
async fn one_shot_session_without_bridge_fails_cleanly() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("settings.conf"),
        "bridge_command = aptshelf-bridge-missing-for-test\n",
    )
    .expect("write settings");
    let options = aptshelf::app::runtime::SessionOptions {
        config_dir: Some(dir.path().to_path_buf()),
        exit_when_idle: true,
        ..aptshelf::app::runtime::SessionOptions::default()
    };
    let err = aptshelf::app::run(&options).await.expect_err("no bridge available");
    assert!(err.to_string().contains("bridge execution failed"), "got: {err}");
}
