//! Typed client for the content API
//!
//! Used by admin tooling and the page editor. Validates requests locally,
//! caches reads by resource path and maps 401 responses to a login redirect.

mod cache;
mod client;
mod error;
mod list_view;

pub use cache::QueryCache;
pub use client::ApiClient;
pub use error::{ClientError, GENERIC_FAILURE};
pub use list_view::PageListView;
