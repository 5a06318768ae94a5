//! `/sitemap.xml` built from the live catalog, projects and published pages.

pub mod handler;
mod render;
pub mod service;

use std::sync::Arc;

use axum::{routing::get, Router};

pub use render::{render_sitemap, ChangeFreq, SitemapUrl};
pub use service::SitemapService;

pub fn routes(service: Arc<SitemapService>) -> Router {
    Router::new()
        .route("/sitemap.xml", get(handler::get_sitemap))
        .with_state(service)
}
