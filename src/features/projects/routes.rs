use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::projects::handlers;
use crate::features::projects::services::ProjectService;

pub fn public_routes(service: Arc<ProjectService>) -> Router {
    Router::new()
        .route("/api/projects", get(handlers::list_projects))
        .route("/api/projects/{slug}", get(handlers::get_project))
        .with_state(service)
}

pub fn admin_routes(service: Arc<ProjectService>) -> Router {
    Router::new()
        .route(
            "/api/admin/projects",
            get(handlers::admin_list_projects).post(handlers::create_project),
        )
        .route(
            "/api/admin/projects/{id}",
            put(handlers::update_project).delete(handlers::delete_project),
        )
        .with_state(service)
}
