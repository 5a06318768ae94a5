use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::catalog::handlers;
use crate::features::catalog::services::{CategoryService, FeatureService, OfferingService};

/// Public catalog routes (no authentication required)
pub fn public_routes(
    categories: Arc<CategoryService>,
    offerings: Arc<OfferingService>,
    features: Arc<FeatureService>,
) -> Router {
    let category_routes = Router::new()
        .route("/api/service-categories", get(handlers::list_categories))
        .route("/api/service-categories/{slug}", get(handlers::get_category))
        .with_state(categories);

    let service_routes = Router::new()
        .route("/api/services", get(handlers::list_services))
        .route(
            "/api/services/{category_slug}/{service_slug}",
            get(handlers::get_service),
        )
        .with_state(offerings);

    let feature_routes = Router::new()
        .route("/api/features", get(handlers::list_features))
        .route(
            "/api/features/{category_slug}/{service_slug}/{feature_slug}",
            get(handlers::get_feature),
        )
        .with_state(features);

    category_routes.merge(service_routes).merge(feature_routes)
}

/// Catalog management routes; mount behind `auth_middleware`
pub fn admin_routes(
    categories: Arc<CategoryService>,
    offerings: Arc<OfferingService>,
    features: Arc<FeatureService>,
) -> Router {
    let category_routes = Router::new()
        .route(
            "/api/admin/service-categories",
            get(handlers::admin_list_categories).post(handlers::create_category),
        )
        .route(
            "/api/admin/service-categories/{id}",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        .with_state(categories);

    let service_routes = Router::new()
        .route(
            "/api/admin/services",
            get(handlers::admin_list_services).post(handlers::create_service),
        )
        .route(
            "/api/admin/services/{id}",
            put(handlers::update_service).delete(handlers::delete_service),
        )
        .with_state(offerings);

    let feature_routes = Router::new()
        .route(
            "/api/admin/features",
            get(handlers::admin_list_features).post(handlers::create_feature),
        )
        .route(
            "/api/admin/features/{id}",
            put(handlers::update_feature).delete(handlers::delete_feature),
        )
        .with_state(features);

    category_routes.merge(service_routes).merge(feature_routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::shared::test_helpers::{with_admin_auth, with_editor_auth, with_user, user_with_roles};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn admin_router() -> Router {
        let pool = lazy_test_pool();
        admin_routes(
            Arc::new(CategoryService::new(pool.clone())),
            Arc::new(OfferingService::new(pool.clone())),
            Arc::new(FeatureService::new(pool)),
        )
    }

    #[tokio::test]
    async fn admin_routes_require_authentication() {
        let server = TestServer::new(admin_router()).unwrap();

        let response = server.get("/api/admin/service-categories").await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn plain_users_cannot_manage_catalog() {
        let server = TestServer::new(with_user(admin_router(), user_with_roles(&["user"]))).unwrap();

        server
            .post("/api/admin/services")
            .json(&json!({ "categoryId": 1, "name": "Web Hosting", "slug": "web-hosting" }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn editors_cannot_delete() {
        let server = TestServer::new(with_editor_auth(admin_router())).unwrap();

        for path in [
            "/api/admin/service-categories/1",
            "/api/admin/services/1",
            "/api/admin/features/1",
        ] {
            server.delete(path).await.assert_status(StatusCode::FORBIDDEN);
        }
    }

    #[tokio::test]
    async fn create_category_rejects_invalid_slug_before_writing() {
        let server = TestServer::new(with_admin_auth(admin_router())).unwrap();

        let response = server
            .post("/api/admin/service-categories")
            .json(&json!({ "name": "Web Development", "slug": "Web Development" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["errors"][0],
            "Slug must contain only lowercase letters, numbers, and hyphens"
        );
    }

    #[tokio::test]
    async fn create_feature_requires_name() {
        let server = TestServer::new(with_editor_auth(admin_router())).unwrap();

        let response = server
            .post("/api/admin/features")
            .json(&json!({ "serviceId": 2, "name": "", "slug": "ssl" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Name is required");
    }

    #[tokio::test]
    async fn malformed_json_is_reported_in_envelope() {
        let server = TestServer::new(with_admin_auth(admin_router())).unwrap();

        let response = server
            .put("/api/admin/services/3")
            .bytes("{not json".into())
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn public_services_rejects_bad_query() {
        let pool = lazy_test_pool();
        let router = public_routes(
            Arc::new(CategoryService::new(pool.clone())),
            Arc::new(OfferingService::new(pool.clone())),
            Arc::new(FeatureService::new(pool)),
        );
        let server = TestServer::new(router).unwrap();

        server
            .get("/api/services?categoryId=not-a-number")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
