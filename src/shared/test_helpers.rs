use crate::features::auth::model::AuthenticatedUser;
use crate::shared::constants::{ROLE_ADMIN, ROLE_EDITOR};

use axum::{extract::Request, middleware::Next, response::Response, Router};

pub fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-sub".to_string(),
        email: Some("tester@ienet.example".to_string()),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

/// Attach a fixed authenticated user to every request, standing in for `auth_middleware`
pub fn with_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                let response: Response = next.run(request).await;
                response
            }
        },
    ))
}

pub fn with_admin_auth(router: Router) -> Router {
    with_user(router, user_with_roles(&[ROLE_ADMIN]))
}

pub fn with_editor_auth(router: Router) -> Router {
    with_user(router, user_with_roles(&[ROLE_EDITOR]))
}
