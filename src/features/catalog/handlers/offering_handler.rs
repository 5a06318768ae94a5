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
    CreateServiceDto, ListServicesQuery, ServiceResponseDto, UpdateServiceDto,
};
use crate::features::catalog::services::OfferingService;
use crate::shared::types::ApiResponse;

/// List active services, optionally narrowed to one category
#[utoipa::path(
    get,
    path = "/api/services",
    params(ListServicesQuery),
    responses(
        (status = 200, description = "Active services", body = ApiResponse<Vec<ServiceResponseDto>>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "catalog"
)]
pub async fn list_services(
    State(service): State<Arc<OfferingService>>,
    AppQuery(query): AppQuery<ListServicesQuery>,
) -> Result<Json<ApiResponse<Vec<ServiceResponseDto>>>> {
    let services = service.list_active(&query).await?;
    Ok(Json(ApiResponse::collection(services)))
}

/// Get an active service by its category and service slugs
#[utoipa::path(
    get,
    path = "/api/services/{category_slug}/{service_slug}",
    params(
        ("category_slug" = String, Path, description = "Category slug"),
        ("service_slug" = String, Path, description = "Service slug")
    ),
    responses(
        (status = 200, description = "Service found", body = ApiResponse<ServiceResponseDto>),
        (status = 404, description = "Service not found or inactive")
    ),
    tag = "catalog"
)]
pub async fn get_service(
    State(service): State<Arc<OfferingService>>,
    Path((category_slug, service_slug)): Path<(String, String)>,
) -> Result<Json<ApiResponse<ServiceResponseDto>>> {
    let found = service.get_by_slugs(&category_slug, &service_slug).await?;
    Ok(Json(ApiResponse::success(Some(found), None, None)))
}

// ==================== Admin ====================

/// List all services, including inactive ones
#[utoipa::path(
    get,
    path = "/api/admin/services",
    responses(
        (status = 200, description = "All services", body = ApiResponse<Vec<ServiceResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required")
    ),
    tag = "catalog-admin",
    security(("bearer_auth" = []))
)]
pub async fn admin_list_services(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<OfferingService>>,
) -> Result<Json<ApiResponse<Vec<ServiceResponseDto>>>> {
    let services = service.list_all().await?;
    Ok(Json(ApiResponse::collection(services)))
}

/// Create a service under an existing category
#[utoipa::path(
    post,
    path = "/api/admin/services",
    request_body = CreateServiceDto,
    responses(
        (status = 201, description = "Service created", body = ApiResponse<ServiceResponseDto>),
        (status = 400, description = "Validation failed or unknown category"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required"),
        (status = 409, description = "Slug already in use within the category")
    ),
    tag = "catalog-admin",
    security(("bearer_auth" = []))
)]
pub async fn create_service(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<OfferingService>>,
    AppJson(dto): AppJson<CreateServiceDto>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceResponseDto>>)> {
    dto.validate()?;

    let created = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(created),
            Some("Service created".to_string()),
            None,
        )),
    ))
}

/// Update a service
#[utoipa::path(
    put,
    path = "/api/admin/services/{id}",
    params(
        ("id" = i64, Path, description = "Service ID")
    ),
    request_body = UpdateServiceDto,
    responses(
        (status = 200, description = "Service updated", body = ApiResponse<ServiceResponseDto>),
        (status = 400, description = "Validation failed or unknown category"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required"),
        (status = 404, description = "Service not found"),
        (status = 409, description = "Slug already in use within the category")
    ),
    tag = "catalog-admin",
    security(("bearer_auth" = []))
)]
pub async fn update_service(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<OfferingService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateServiceDto>,
) -> Result<Json<ApiResponse<ServiceResponseDto>>> {
    dto.validate()?;

    let updated = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(updated),
        Some("Service updated".to_string()),
        None,
    )))
}

/// Delete a service that has no features
#[utoipa::path(
    delete,
    path = "/api/admin/services/{id}",
    params(
        ("id" = i64, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "Service deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Service not found"),
        (status = 409, description = "Service still has features")
    ),
    tag = "catalog-admin",
    security(("bearer_auth" = []))
)]
pub async fn delete_service(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<OfferingService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Service deleted".to_string()),
        None,
    )))
}
