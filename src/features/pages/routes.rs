use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::pages::handlers;
use crate::features::pages::services::PageService;

/// Public page rendering
pub fn public_routes(service: Arc<PageService>) -> Router {
    Router::new()
        .route("/api/pages/slug/{slug}", get(handlers::get_published_page))
        .with_state(service)
}

/// Page management; mount behind `auth_middleware`
pub fn protected_routes(service: Arc<PageService>) -> Router {
    Router::new()
        .route(
            "/api/pages",
            get(handlers::list_pages).post(handlers::create_page),
        )
        .route("/api/pages/bulk", post(handlers::bulk_pages))
        .route(
            "/api/pages/{id}",
            get(handlers::get_page)
                .put(handlers::update_page)
                .delete(handlers::delete_page),
        )
        .route("/api/pages/{id}/status", patch(handlers::update_page_status))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::shared::test_helpers::{with_admin_auth, with_editor_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;
    use serde_json::{json, Value};

    fn router() -> Router {
        protected_routes(Arc::new(PageService::new(lazy_test_pool())))
    }

    #[tokio::test]
    async fn listing_requires_authentication() {
        let server = TestServer::new(router()).unwrap();
        let response = server.get("/api/pages").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn empty_title_rejected_before_write() {
        let server = TestServer::new(with_editor_auth(router())).unwrap();

        let response = server
            .post("/api/pages")
            .json(&json!({ "title": "", "slug": "about-us", "status": "draft" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Title is required");
        assert_eq!(body["errors"], json!(["Title is required"]));
    }

    #[tokio::test]
    async fn bad_slug_rejected() {
        let server = TestServer::new(with_editor_auth(router())).unwrap();
        let title: String = Sentence(2..5).fake();

        let response = server
            .post("/api/pages")
            .json(&json!({ "title": title, "slug": "About Us!" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["message"],
            "Slug must contain only lowercase letters, numbers, and hyphens"
        );
    }

    #[tokio::test]
    async fn unknown_status_rejected() {
        let server = TestServer::new(with_editor_auth(router())).unwrap();

        server
            .patch("/api/pages/1/status")
            .json(&json!({ "status": "deleted" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn editors_cannot_delete_pages() {
        let server = TestServer::new(with_editor_auth(router())).unwrap();

        server
            .delete("/api/pages/7")
            .await
            .assert_status(StatusCode::FORBIDDEN);

        server
            .post("/api/pages/bulk")
            .json(&json!({ "action": "delete", "pageIds": [7, 8] }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn bulk_requires_selection() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();

        let response = server
            .post("/api/pages/bulk")
            .json(&json!({ "action": "publish", "pageIds": [] }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Select between 1 and 100 pages");
    }

    #[tokio::test]
    async fn invalid_sort_field_rejected() {
        let server = TestServer::new(with_editor_auth(router())).unwrap();

        server
            .get("/api/pages?sortBy=password")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
