//! Filter cascade decisions.
//!
//! Two pure concerns live here: composing the single query descriptor from
//! ambient selection state (with per-call overrides), and narrowing an
//! accepted snapshot by the active store into the visible list.

use crate::state::{AppState, FilterParams, Tab, TabFilter};
use crate::stores::resolver;

/// Per-call overrides applied on top of the ambient selection state,
/// field-by-field.
///
/// The repository override is doubly optional so a call can distinguish
/// "leave the ambient repository alone" from "query without a repository".
#[derive(Clone, Debug, Default)]
pub struct FilterOverrides {
    /// Replace the repository narrowing for this call.
    pub repository: Option<Option<String>>,
    /// Replace the active tab for this call.
    pub tab: Option<Tab>,
    /// Replace the search text for this call.
    pub search: Option<String>,
    /// Replace the result limit for this call.
    pub limit: Option<usize>,
}

/// What: Compose the query descriptor for the current selection.
///
/// Inputs:
/// - `app`: Ambient selection state.
/// - `overrides`: Per-call replacements, each taking precedence over the
///   ambient value of the same field.
///
/// Output:
/// - A [`FilterParams`] honoring the search/tab exclusivity rule: search
///   text is included only on the unrestricted tab, and a tab restriction
///   always suppresses search text even when some is set.
#[must_use]
pub fn build_filter_params(app: &AppState, overrides: &FilterOverrides) -> FilterParams {
    let repository = overrides
        .repository
        .clone()
        .unwrap_or_else(|| app.repository.clone());
    let tab = overrides.tab.unwrap_or(app.tab);
    let search = overrides.search.as_deref().unwrap_or(&app.search);
    let limit = overrides.limit.unwrap_or(app.limit);
    match tab {
        Tab::Available => {
            let trimmed = search.trim();
            FilterParams {
                repository,
                tab: None,
                search: if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                },
                limit,
            }
        }
        Tab::Installed => FilterParams {
            repository,
            tab: Some(TabFilter::Installed),
            search: None,
            limit,
        },
        Tab::Upgradable => FilterParams {
            repository,
            tab: Some(TabFilter::Upgradable),
            search: None,
            limit,
        },
    }
}

/// What: Recompute the visible package list from the current snapshot.
///
/// Inputs:
/// - `app`: State whose `snapshot` and active store drive the view.
///
/// Output:
/// - Rewrites `app.visible` with the store-narrowed, name-sorted packages.
///
/// Details:
/// - The backend already applied the repository/tab/search dimensions; the
///   store rule narrows strictly within that result.
pub fn refresh_visible(app: &mut AppState) {
    let Some(snapshot) = &app.snapshot else {
        app.visible.clear();
        return;
    };
    let mut items = match app.active_store() {
        Some(store) => resolver::filter_packages(&snapshot.packages, store),
        None => snapshot.packages.clone(),
    };
    items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    app.visible = items;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CatalogSnapshot, Package};
    use crate::stores::{Store, StoreRule};

    fn app_with(tab: Tab, search: &str) -> AppState {
        AppState {
            tab,
            search: search.into(),
            limit: 100,
            ..AppState::default()
        }
    }

    #[test]
    /// What: Search is honored only on the unrestricted tab
    ///
    /// - Input: Non-empty search on each of the three tabs
    /// - Output: Search present without restriction on available; the
    ///   restricted tabs carry the restriction and never the search
    fn search_only_on_available_tab() {
        let available = build_filter_params(&app_with(Tab::Available, "ngi"), &FilterOverrides::default());
        assert_eq!(available.search.as_deref(), Some("ngi"));
        assert_eq!(available.tab, None);

        let installed = build_filter_params(&app_with(Tab::Installed, "ngi"), &FilterOverrides::default());
        assert_eq!(installed.search, None);
        assert_eq!(installed.tab, Some(TabFilter::Installed));

        let upgradable = build_filter_params(&app_with(Tab::Upgradable, "ngi"), &FilterOverrides::default());
        assert_eq!(upgradable.search, None);
        assert_eq!(upgradable.tab, Some(TabFilter::Upgradable));
    }

    #[test]
    /// What: Whitespace-only search is treated as no search
    ///
    /// - Input: Blank search on the available tab
    /// - Output: Neither search nor restriction in the descriptor
    fn blank_search_is_absent() {
        let params = build_filter_params(&app_with(Tab::Available, "   "), &FilterOverrides::default());
        assert_eq!(params.search, None);
        assert_eq!(params.tab, None);
    }

    #[test]
    /// What: Overrides win field-by-field over ambient state
    ///
    /// - Input: Ambient repo/tab/search, overrides for each field
    /// - Output: Overridden fields from the overrides, the rest ambient
    fn overrides_take_precedence() {
        let mut app = app_with(Tab::Installed, "kept");
        app.repository = Some("main".into());
        let overrides = FilterOverrides {
            repository: Some(None),
            tab: Some(Tab::Available),
            search: Some("ngi".into()),
            limit: Some(7),
        };
        let params = build_filter_params(&app, &overrides);
        assert_eq!(params.repository, None);
        assert_eq!(params.tab, None);
        assert_eq!(params.search.as_deref(), Some("ngi"));
        assert_eq!(params.limit, 7);

        // A partial override leaves the other ambient fields intact.
        let partial = FilterOverrides {
            tab: Some(Tab::Upgradable),
            ..FilterOverrides::default()
        };
        let params = build_filter_params(&app, &partial);
        assert_eq!(params.repository.as_deref(), Some("main"));
        assert_eq!(params.tab, Some(TabFilter::Upgradable));
        assert_eq!(params.limit, 100);
    }

    #[test]
    /// What: The visible list narrows by store and sorts by name
    ///
    /// - Input: Snapshot with three packages, store matching section "net"
    /// - Output: Only net members, sorted case-insensitively by name
    fn visible_narrows_and_sorts() {
        let mut app = AppState::default();
        app.stores = vec![Store {
            id: "marine".into(),
            name: String::new(),
            description: String::new(),
            rule: StoreRule {
                include_sections: vec!["net".into()],
                ..StoreRule::default()
            },
        }];
        app.snapshot = Some(CatalogSnapshot {
            packages: vec![
                Package {
                    name: "Zeta-tool".into(),
                    section: "net".into(),
                    ..Package::default()
                },
                Package {
                    name: "vim".into(),
                    section: "editors".into(),
                    ..Package::default()
                },
                Package {
                    name: "alpha-tool".into(),
                    section: "net".into(),
                    ..Package::default()
                },
            ],
            ..CatalogSnapshot::default()
        });
        app.active_store = Some("marine".into());
        refresh_visible(&mut app);
        assert_eq!(
            app.visible.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["alpha-tool", "Zeta-tool"]
        );

        app.active_store = None;
        refresh_visible(&mut app);
        assert_eq!(app.visible.len(), 3);

        app.snapshot = None;
        refresh_visible(&mut app);
        assert!(app.visible.is_empty());
    }
}
