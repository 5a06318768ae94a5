use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::{RequireAdmin, RequireEditor};
use crate::features::pages::dtos::{
    BulkPageAction, BulkPageActionDto, BulkPageResultDto, CreatePageDto, PageQueryParams,
    PageResponseDto, UpdatePageDto, UpdatePageStatusDto,
};
use crate::features::pages::services::PageService;
use crate::shared::types::ApiResponse;

/// List pages
///
/// Drafts and archived pages are included, so this requires the editor role.
#[utoipa::path(
    get,
    path = "/api/pages",
    params(PageQueryParams),
    responses(
        (status = 200, description = "Pages matching the filters", body = ApiResponse<Vec<PageResponseDto>>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required")
    ),
    tag = "pages",
    security(("bearer_auth" = []))
)]
pub async fn list_pages(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<PageService>>,
    AppQuery(params): AppQuery<PageQueryParams>,
) -> Result<Json<ApiResponse<Vec<PageResponseDto>>>> {
    let pages = service.list(&params).await?;
    Ok(Json(ApiResponse::collection(pages)))
}

#[utoipa::path(
    get,
    path = "/api/pages/{id}",
    params(
        ("id" = i64, Path, description = "Page ID")
    ),
    responses(
        (status = 200, description = "Page found", body = ApiResponse<PageResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required"),
        (status = 404, description = "Page not found")
    ),
    tag = "pages",
    security(("bearer_auth" = []))
)]
pub async fn get_page(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<PageService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PageResponseDto>>> {
    let page = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(page), None, None)))
}

/// Get a published page by slug
///
/// Public. Each successful fetch increments the page's view count.
#[utoipa::path(
    get,
    path = "/api/pages/slug/{slug}",
    params(
        ("slug" = String, Path, description = "Page slug")
    ),
    responses(
        (status = 200, description = "Published page", body = ApiResponse<PageResponseDto>),
        (status = 404, description = "No published page with this slug")
    ),
    tag = "pages"
)]
pub async fn get_published_page(
    State(service): State<Arc<PageService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<PageResponseDto>>> {
    let page = service.get_published_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(Some(page), None, None)))
}

/// Create a page
///
/// When `content` is omitted and `templateId` is given, the template's
/// elements are copied with new ids.
#[utoipa::path(
    post,
    path = "/api/pages",
    request_body = CreatePageDto,
    responses(
        (status = 201, description = "Page created", body = ApiResponse<PageResponseDto>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "pages",
    security(("bearer_auth" = []))
)]
pub async fn create_page(
    RequireEditor(user): RequireEditor,
    State(service): State<Arc<PageService>>,
    AppJson(dto): AppJson<CreatePageDto>,
) -> Result<(StatusCode, Json<ApiResponse<PageResponseDto>>)> {
    dto.validate()?;

    let page = service.create(dto, &user).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(page),
            Some("Page created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/pages/{id}",
    params(
        ("id" = i64, Path, description = "Page ID")
    ),
    request_body = UpdatePageDto,
    responses(
        (status = 200, description = "Page updated", body = ApiResponse<PageResponseDto>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required"),
        (status = 404, description = "Page not found"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "pages",
    security(("bearer_auth" = []))
)]
pub async fn update_page(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<PageService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdatePageDto>,
) -> Result<Json<ApiResponse<PageResponseDto>>> {
    dto.validate()?;

    let page = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(page),
        Some("Page updated".to_string()),
        None,
    )))
}

/// Change a page's status
///
/// Moving to `published` stamps `publishedAt` with the current time.
#[utoipa::path(
    patch,
    path = "/api/pages/{id}/status",
    params(
        ("id" = i64, Path, description = "Page ID")
    ),
    request_body = UpdatePageStatusDto,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<PageResponseDto>),
        (status = 400, description = "Unknown status"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required"),
        (status = 404, description = "Page not found")
    ),
    tag = "pages",
    security(("bearer_auth" = []))
)]
pub async fn update_page_status(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<PageService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdatePageStatusDto>,
) -> Result<Json<ApiResponse<PageResponseDto>>> {
    let page = service.update_status(id, dto.status).await?;
    Ok(Json(ApiResponse::success(Some(page), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/pages/{id}",
    params(
        ("id" = i64, Path, description = "Page ID")
    ),
    responses(
        (status = 200, description = "Page deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Page not found")
    ),
    tag = "pages",
    security(("bearer_auth" = []))
)]
pub async fn delete_page(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<PageService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Page deleted".to_string()),
        None,
    )))
}

/// Apply publish / unpublish / archive / delete to several pages at once
///
/// Editors may change status; deleting requires the admin role.
#[utoipa::path(
    post,
    path = "/api/pages/bulk",
    request_body = BulkPageActionDto,
    responses(
        (status = 200, description = "Action applied", body = ApiResponse<BulkPageResultDto>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Insufficient role for the action")
    ),
    tag = "pages",
    security(("bearer_auth" = []))
)]
pub async fn bulk_pages(
    RequireEditor(user): RequireEditor,
    State(service): State<Arc<PageService>>,
    AppJson(dto): AppJson<BulkPageActionDto>,
) -> Result<Json<ApiResponse<BulkPageResultDto>>> {
    dto.validate()?;

    if dto.action == BulkPageAction::Delete && !user.is_admin() {
        return Err(AppError::Forbidden("Insufficient permissions".to_string()));
    }

    let result = service.bulk(dto).await?;
    let message = format!("{} pages updated", result.affected.len());
    Ok(Json(ApiResponse::success(Some(result), Some(message), None)))
}
