use crate::features::auth::handlers;
use axum::{routing::get, Router};

/// Protected auth routes (require JWT authentication)
pub fn protected_routes() -> Router {
    Router::new().route("/api/auth/user", get(handlers::get_current_user))
}
