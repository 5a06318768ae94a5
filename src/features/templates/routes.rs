use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::templates::handlers;
use crate::features::templates::services::TemplateService;

pub fn public_routes(service: Arc<TemplateService>) -> Router {
    Router::new()
        .route("/api/templates", get(handlers::list_templates))
        .route("/api/templates/{id}", get(handlers::get_template))
        .with_state(service)
}

pub fn protected_routes(service: Arc<TemplateService>) -> Router {
    Router::new()
        .route("/api/templates", post(handlers::create_template))
        .route(
            "/api/templates/{id}",
            put(handlers::update_template).delete(handlers::delete_template),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::shared::test_helpers::with_editor_auth;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn router() -> Router {
        protected_routes(Arc::new(TemplateService::new(lazy_test_pool())))
    }

    #[tokio::test]
    async fn create_requires_authentication() {
        let server = TestServer::new(router()).unwrap();
        server
            .post("/api/templates")
            .json(&json!({ "name": "Landing", "content": { "elements": [] } }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_block_type_is_rejected() {
        let server = TestServer::new(with_editor_auth(router())).unwrap();
        server
            .post("/api/templates")
            .json(&json!({
                "name": "Landing",
                "content": { "elements": [{ "id": "m", "type": "marquee" }] }
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn editors_cannot_delete_templates() {
        let server = TestServer::new(with_editor_auth(router())).unwrap();
        server
            .delete("/api/templates/4")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
