//! Core value types used by aptshelf state.

use crate::bridge::BridgeError;

/// A single installable package as reported by one catalog query.
///
/// Instances are immutable once returned by the bridge; a new query always
/// produces an entirely new set, never a patched one.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Package {
    /// Canonical package name, unique within one query result.
    pub name: String,
    /// Candidate version string as reported by the backend.
    pub version: String,
    /// Target architecture when the backend knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    /// One-line description suitable for list display.
    pub summary: String,
    /// Archive section (e.g. "net", "web").
    pub section: String,
    /// Whether any version of the package is currently installed.
    pub installed: bool,
    /// Whether a newer candidate than the installed version exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgradable: Option<bool>,
    /// Installed version, present only for installed packages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_version: Option<String>,
    /// Candidate version, present when the backend reports it separately.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_version: Option<String>,
    /// Origin of the providing repository, used by store rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Debtags-style tag strings attached to the package.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// One origin repository the catalog can be narrowed to.
///
/// Repositories are a filter dimension, not a materialized collection; the
/// set is enumerated once per session and treated as read-only.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Repository {
    /// Stable identifier passed back to the bridge as `--repo`.
    pub id: String,
    /// Human-readable label derived from the origin or release label.
    pub label: String,
}

/// Catalog view selected in the UI.
///
/// Exactly one tab is active at a time. Only [`Tab::Available`] supports
/// free-text search; the other two are already narrow restrictions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    /// Unrestricted view of every available package.
    #[default]
    Available,
    /// Installed packages only.
    Installed,
    /// Packages with a pending upgrade only.
    Upgradable,
}

impl Tab {
    /// Return the string key used in settings files and CLI flags for this tab.
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Installed => "installed",
            Self::Upgradable => "upgradable",
        }
    }

    /// Parse a tab from its settings key or common aliases.
    ///
    /// Inputs: `s` config string (case-insensitive).
    ///
    /// Output: `Some(Tab)` on recognized value; `None` otherwise.
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "available" | "all" => Some(Self::Available),
            "installed" => Some(Self::Installed),
            "upgradable" | "updates" => Some(Self::Upgradable),
            _ => None,
        }
    }
}

/// Tab restriction actually encoded into a query.
///
/// The unrestricted tab is expressed as absence, so a [`FilterParams`] can
/// never carry both a restriction and search text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TabFilter {
    /// Restrict the query to installed packages.
    Installed,
    /// Restrict the query to upgradable packages.
    Upgradable,
}

impl TabFilter {
    /// Value passed to the bridge's `--filter` argument.
    pub const fn as_arg(self) -> &'static str {
        match self {
            Self::Installed => "installed",
            Self::Upgradable => "upgradable",
        }
    }
}

/// The single query descriptor handed to the bridge for one catalog query.
///
/// Invariant: `search` and `tab` are mutually exclusive; the builder in
/// `logic::filter` is the only producer and enforces it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterParams {
    /// Repository id to narrow to, when one is selected.
    pub repository: Option<String>,
    /// Tab restriction; `None` means the unrestricted view.
    pub tab: Option<TabFilter>,
    /// Free-text search, only ever present without a tab restriction.
    pub search: Option<String>,
    /// Maximum number of packages the bridge may return.
    pub limit: usize,
}

/// Result of the most recently accepted catalog query.
///
/// Owned exclusively by the request sequencer and replaced wholesale on each
/// accepted response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogSnapshot {
    /// Packages returned by the query, in backend order.
    pub packages: Vec<Package>,
    /// Total matching count before the limit was applied.
    pub total_count: usize,
    /// Whether the result set was cut off by the limit.
    pub truncated: bool,
    /// Filter description echoed back by the bridge, kept for logging.
    pub applied_filters: Vec<String>,
    /// Whether the apt metadata lists have ever been downloaded.
    pub lists_populated: bool,
}

/// Catalog query sent to the background query worker.
#[derive(Clone, Debug)]
pub struct QueryRequest {
    /// Monotonic token used to correlate and staleness-check the response.
    pub id: u64,
    /// Descriptor composed by the filter parameter builder.
    pub params: FilterParams,
}

/// Response corresponding to a prior [`QueryRequest`].
#[derive(Debug)]
pub struct QueryOutcome {
    /// Echoed token from the originating request.
    pub id: u64,
    /// Parsed snapshot or the classified failure.
    pub result: Result<CatalogSnapshot, BridgeError>,
}

/// Request for one privileged package-list refresh.
#[derive(Clone, Copy, Debug)]
pub struct RefreshRequest;

/// Completion signal of a privileged package-list refresh.
#[derive(Debug)]
pub struct RefreshOutcome {
    /// Final bridge message on success or the classified failure.
    pub result: Result<String, BridgeError>,
}

/// Result of the one-shot repository enumeration performed at startup.
#[derive(Debug)]
pub struct RepoListOutcome {
    /// Enumerated repositories or the classified failure.
    pub result: Result<Vec<Repository>, BridgeError>,
}

/// Selection changes and commands submitted by a UI collaborator.
///
/// Intents are the only way anything outside the runtime influences the
/// state container; they are applied serially by the event loop.
#[derive(Clone, Debug)]
pub enum Intent {
    /// Narrow the catalog to one repository, or clear the narrowing.
    SelectRepository(Option<String>),
    /// Switch the active tab.
    SelectTab(Tab),
    /// Replace the free-text search string.
    SetSearch(String),
    /// Activate a configured store by id, or clear the store narrowing.
    SelectStore(Option<String>),
    /// Request a package-list refresh.
    Refresh,
    /// Clear the current query error notice.
    DismissQueryError,
    /// Clear the current refresh error notice.
    DismissRefreshError,
    /// Leave the event loop.
    Quit,
}
