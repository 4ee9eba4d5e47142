//! Application state: value types and the owned state container.

pub mod app_state;
pub mod types;

pub use app_state::AppState;
pub use types::{
    CatalogSnapshot, FilterParams, Intent, Package, QueryOutcome, QueryRequest,
    RefreshOutcome, RefreshRequest, RepoListOutcome, Repository, Tab, TabFilter,
};
