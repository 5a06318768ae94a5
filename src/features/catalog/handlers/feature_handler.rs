use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::{RequireAdmin, RequireEditor};
use crate::features::catalog::dtos::{
    CreateFeatureDto, FeatureResponseDto, ListFeaturesQuery, UpdateFeatureDto,
};
use crate::features::catalog::services::FeatureService;
use crate::shared::types::ApiResponse;

/// List active features, optionally narrowed to one service
#[utoipa::path(
    get,
    path = "/api/features",
    params(ListFeaturesQuery),
    responses(
        (status = 200, description = "Active features", body = ApiResponse<Vec<FeatureResponseDto>>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "catalog"
)]
pub async fn list_features(
    State(service): State<Arc<FeatureService>>,
    AppQuery(query): AppQuery<ListFeaturesQuery>,
) -> Result<Json<ApiResponse<Vec<FeatureResponseDto>>>> {
    let features = service.list_active(&query).await?;
    Ok(Json(ApiResponse::collection(features)))
}

/// Get an active feature by its full slug path
#[utoipa::path(
    get,
    path = "/api/features/{category_slug}/{service_slug}/{feature_slug}",
    params(
        ("category_slug" = String, Path, description = "Category slug"),
        ("service_slug" = String, Path, description = "Service slug"),
        ("feature_slug" = String, Path, description = "Feature slug")
    ),
    responses(
        (status = 200, description = "Feature found", body = ApiResponse<FeatureResponseDto>),
        (status = 404, description = "Feature not found or inactive")
    ),
    tag = "catalog"
)]
pub async fn get_feature(
    State(service): State<Arc<FeatureService>>,
    Path((category_slug, service_slug, feature_slug)): Path<(String, String, String)>,
) -> Result<Json<ApiResponse<FeatureResponseDto>>> {
    let feature = service
        .get_by_slugs(&category_slug, &service_slug, &feature_slug)
        .await?;
    Ok(Json(ApiResponse::success(Some(feature), None, None)))
}

// ==================== Admin ====================

#[utoipa::path(
    get,
    path = "/api/admin/features",
    responses(
        (status = 200, description = "All features", body = ApiResponse<Vec<FeatureResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required")
    ),
    tag = "catalog-admin",
    security(("bearer_auth" = []))
)]
pub async fn admin_list_features(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<FeatureService>>,
) -> Result<Json<ApiResponse<Vec<FeatureResponseDto>>>> {
    let features = service.list_all().await?;
    Ok(Json(ApiResponse::collection(features)))
}

#[utoipa::path(
    post,
    path = "/api/admin/features",
    request_body = CreateFeatureDto,
    responses(
        (status = 201, description = "Feature created", body = ApiResponse<FeatureResponseDto>),
        (status = 400, description = "Validation failed or unknown service"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required"),
        (status = 409, description = "Slug already in use within the service")
    ),
    tag = "catalog-admin",
    security(("bearer_auth" = []))
)]
pub async fn create_feature(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<FeatureService>>,
    AppJson(dto): AppJson<CreateFeatureDto>,
) -> Result<(StatusCode, Json<ApiResponse<FeatureResponseDto>>)> {
    dto.validate()?;

    let feature = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(feature),
            Some("Feature created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/features/{id}",
    params(
        ("id" = i64, Path, description = "Feature ID")
    ),
    request_body = UpdateFeatureDto,
    responses(
        (status = 200, description = "Feature updated", body = ApiResponse<FeatureResponseDto>),
        (status = 400, description = "Validation failed or unknown service"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required"),
        (status = 404, description = "Feature not found")
    ),
    tag = "catalog-admin",
    security(("bearer_auth" = []))
)]
pub async fn update_feature(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<FeatureService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateFeatureDto>,
) -> Result<Json<ApiResponse<FeatureResponseDto>>> {
    dto.validate()?;

    let feature = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(feature),
        Some("Feature updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/admin/features/{id}",
    params(
        ("id" = i64, Path, description = "Feature ID")
    ),
    responses(
        (status = 200, description = "Feature deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Feature not found")
    ),
    tag = "catalog-admin",
    security(("bearer_auth" = []))
)]
pub async fn delete_feature(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<FeatureService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Feature deleted".to_string()),
        None,
    )))
}
