use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::enquiries::handlers;
use crate::features::enquiries::services::EnquiryService;

pub fn public_routes(service: Arc<EnquiryService>) -> Router {
    Router::new()
        .route("/api/contact", post(handlers::submit_enquiry))
        .with_state(service)
}

pub fn admin_routes(service: Arc<EnquiryService>) -> Router {
    Router::new()
        .route("/api/admin/enquiries", get(handlers::list_enquiries))
        .route("/api/admin/enquiries/{id}", put(handlers::update_enquiry))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::shared::test_helpers::{user_with_roles, with_user};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn service() -> Arc<EnquiryService> {
        Arc::new(EnquiryService::new(lazy_test_pool()))
    }

    #[tokio::test]
    async fn contact_form_validates_before_storing() {
        let server = TestServer::new(public_routes(service())).unwrap();
        let response = server
            .post("/api/contact")
            .json(&json!({ "name": "Asha", "email": "asha@", "message": "" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
    }

    #[tokio::test]
    async fn enquiries_hidden_from_plain_users() {
        let router = with_user(admin_routes(service()), user_with_roles(&["user"]));
        let server = TestServer::new(router).unwrap();
        server
            .get("/api/admin/enquiries")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn unknown_status_filter_rejected() {
        let router = with_user(admin_routes(service()), user_with_roles(&["editor"]));
        let server = TestServer::new(router).unwrap();
        server
            .get("/api/admin/enquiries?status=spam")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
