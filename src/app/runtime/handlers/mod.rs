//! Event loop handlers: the only code that mutates [`crate::state::AppState`].

pub mod catalog;
pub mod intent;
pub mod refresh;
pub mod repos;

pub use catalog::handle_query_outcome;
pub use intent::handle_intent;
pub use refresh::{handle_refresh_outcome, maybe_start_auto_refresh, request_refresh};
pub use repos::handle_repo_list;
