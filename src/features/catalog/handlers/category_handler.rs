use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireEditor};
use crate::features::catalog::dtos::{
    CreateServiceCategoryDto, ServiceCategoryResponseDto, UpdateServiceCategoryDto,
};
use crate::features::catalog::services::CategoryService;
use crate::shared::types::ApiResponse;

/// List active service categories
#[utoipa::path(
    get,
    path = "/api/service-categories",
    responses(
        (status = 200, description = "Active categories ordered by sort order", body = ApiResponse<Vec<ServiceCategoryResponseDto>>),
    ),
    tag = "catalog"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<ServiceCategoryResponseDto>>>> {
    let categories = service.list_active().await?;
    Ok(Json(ApiResponse::collection(categories)))
}

/// Get an active service category by slug
#[utoipa::path(
    get,
    path = "/api/service-categories/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<ServiceCategoryResponseDto>),
        (status = 404, description = "Category not found or inactive")
    ),
    tag = "catalog"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ServiceCategoryResponseDto>>> {
    let category = service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

// ==================== Admin ====================

/// List all service categories, including inactive ones
#[utoipa::path(
    get,
    path = "/api/admin/service-categories",
    responses(
        (status = 200, description = "All categories", body = ApiResponse<Vec<ServiceCategoryResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required")
    ),
    tag = "catalog-admin",
    security(("bearer_auth" = []))
)]
pub async fn admin_list_categories(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<ServiceCategoryResponseDto>>>> {
    let categories = service.list_all().await?;
    Ok(Json(ApiResponse::collection(categories)))
}

/// Create a service category
#[utoipa::path(
    post,
    path = "/api/admin/service-categories",
    request_body = CreateServiceCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<ServiceCategoryResponseDto>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "catalog-admin",
    security(("bearer_auth" = []))
)]
pub async fn create_category(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateServiceCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceCategoryResponseDto>>)> {
    dto.validate()?;

    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(category),
            Some("Service category created".to_string()),
            None,
        )),
    ))
}

/// Update a service category
#[utoipa::path(
    put,
    path = "/api/admin/service-categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    request_body = UpdateServiceCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<ServiceCategoryResponseDto>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "catalog-admin",
    security(("bearer_auth" = []))
)]
pub async fn update_category(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateServiceCategoryDto>,
) -> Result<Json<ApiResponse<ServiceCategoryResponseDto>>> {
    dto.validate()?;

    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(category),
        Some("Service category updated".to_string()),
        None,
    )))
}

/// Delete a service category that has no services
#[utoipa::path(
    delete,
    path = "/api/admin/service-categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still has services")
    ),
    tag = "catalog-admin",
    security(("bearer_auth" = []))
)]
pub async fn delete_category(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Service category deleted".to_string()),
        None,
    )))
}
