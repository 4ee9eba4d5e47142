//! Pure decision logic shared by the runtime handlers.

pub mod filter;
pub mod query;

pub use filter::{FilterOverrides, build_filter_params, refresh_visible};
pub use query::{send_query, send_query_with};
