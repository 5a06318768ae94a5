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
use crate::features::templates::dtos::{
    CreateTemplateDto, TemplateQuery, TemplateResponseDto, UpdateTemplateDto,
};
use crate::features::templates::services::TemplateService;
use crate::shared::types::ApiResponse;

/// List active content templates
#[utoipa::path(
    get,
    path = "/api/templates",
    params(TemplateQuery),
    responses(
        (status = 200, description = "Active templates", body = ApiResponse<Vec<TemplateResponseDto>>),
    ),
    tag = "templates"
)]
pub async fn list_templates(
    State(service): State<Arc<TemplateService>>,
    AppQuery(query): AppQuery<TemplateQuery>,
) -> Result<Json<ApiResponse<Vec<TemplateResponseDto>>>> {
    let templates = service.list(&query).await?;
    Ok(Json(ApiResponse::collection(templates)))
}

#[utoipa::path(
    get,
    path = "/api/templates/{id}",
    params(
        ("id" = i64, Path, description = "Template ID")
    ),
    responses(
        (status = 200, description = "Template found", body = ApiResponse<TemplateResponseDto>),
        (status = 404, description = "Template not found")
    ),
    tag = "templates"
)]
pub async fn get_template(
    State(service): State<Arc<TemplateService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<TemplateResponseDto>>> {
    let template = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(template), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/templates",
    request_body = CreateTemplateDto,
    responses(
        (status = 201, description = "Template created", body = ApiResponse<TemplateResponseDto>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required")
    ),
    tag = "templates",
    security(("bearer_auth" = []))
)]
pub async fn create_template(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<TemplateService>>,
    AppJson(dto): AppJson<CreateTemplateDto>,
) -> Result<(StatusCode, Json<ApiResponse<TemplateResponseDto>>)> {
    dto.validate()?;

    let template = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(template),
            Some("Template created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/templates/{id}",
    params(
        ("id" = i64, Path, description = "Template ID")
    ),
    request_body = UpdateTemplateDto,
    responses(
        (status = 200, description = "Template updated", body = ApiResponse<TemplateResponseDto>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required"),
        (status = 404, description = "Template not found")
    ),
    tag = "templates",
    security(("bearer_auth" = []))
)]
pub async fn update_template(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<TemplateService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateTemplateDto>,
) -> Result<Json<ApiResponse<TemplateResponseDto>>> {
    dto.validate()?;

    let template = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(template),
        Some("Template updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/templates/{id}",
    params(
        ("id" = i64, Path, description = "Template ID")
    ),
    responses(
        (status = 200, description = "Template deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Template not found")
    ),
    tag = "templates",
    security(("bearer_auth" = []))
)]
pub async fn delete_template(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<TemplateService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Template deleted".to_string()),
        None,
    )))
}
