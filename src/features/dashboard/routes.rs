use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Dashboard routes; mount behind `auth_middleware`
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/dashboard/stats", get(handlers::get_stats))
        .with_state(dashboard_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::shared::test_helpers::{user_with_roles, with_user};
    use axum::http::StatusCode;
    use axum_test::TestServer;

    #[tokio::test]
    async fn stats_require_editor_role() {
        let service = Arc::new(DashboardService::new(lazy_test_pool()));

        let anonymous = TestServer::new(routes(Arc::clone(&service))).unwrap();
        anonymous
            .get("/api/dashboard/stats")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let plain = TestServer::new(with_user(routes(service), user_with_roles(&["user"]))).unwrap();
        plain
            .get("/api/dashboard/stats")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
