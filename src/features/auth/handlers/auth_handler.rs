use axum::Json;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::types::ApiResponse;

/// Get the currently authenticated user
#[utoipa::path(
    get,
    path = "/api/auth/user",
    responses(
        (status = 200, description = "Authenticated user", body = ApiResponse<AuthenticatedUser>),
        (status = 401, description = "Not authenticated")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_current_user(
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<AuthenticatedUser>>> {
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}
