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
use crate::features::projects::dtos::{
    CreateProjectDto, ListProjectsQuery, ProjectResponseDto, UpdateProjectDto,
};
use crate::features::projects::services::ProjectService;
use crate::shared::types::ApiResponse;

/// List active projects
#[utoipa::path(
    get,
    path = "/api/projects",
    params(ListProjectsQuery),
    responses(
        (status = 200, description = "Active projects", body = ApiResponse<Vec<ProjectResponseDto>>),
    ),
    tag = "projects"
)]
pub async fn list_projects(
    State(service): State<Arc<ProjectService>>,
    AppQuery(query): AppQuery<ListProjectsQuery>,
) -> Result<Json<ApiResponse<Vec<ProjectResponseDto>>>> {
    let projects = service.list_active(&query).await?;
    Ok(Json(ApiResponse::collection(projects)))
}

#[utoipa::path(
    get,
    path = "/api/projects/{slug}",
    params(
        ("slug" = String, Path, description = "Project slug")
    ),
    responses(
        (status = 200, description = "Project found", body = ApiResponse<ProjectResponseDto>),
        (status = 404, description = "Project not found")
    ),
    tag = "projects"
)]
pub async fn get_project(
    State(service): State<Arc<ProjectService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ProjectResponseDto>>> {
    let project = service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(Some(project), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/admin/projects",
    responses(
        (status = 200, description = "All projects", body = ApiResponse<Vec<ProjectResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required")
    ),
    tag = "projects",
    security(("bearer_auth" = []))
)]
pub async fn admin_list_projects(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<ProjectService>>,
) -> Result<Json<ApiResponse<Vec<ProjectResponseDto>>>> {
    let projects = service.list_all().await?;
    Ok(Json(ApiResponse::collection(projects)))
}

#[utoipa::path(
    post,
    path = "/api/admin/projects",
    request_body = CreateProjectDto,
    responses(
        (status = 201, description = "Project created", body = ApiResponse<ProjectResponseDto>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "projects",
    security(("bearer_auth" = []))
)]
pub async fn create_project(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<ProjectService>>,
    AppJson(dto): AppJson<CreateProjectDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProjectResponseDto>>)> {
    dto.validate()?;

    let project = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(project),
            Some("Project created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/projects/{id}",
    params(
        ("id" = i64, Path, description = "Project ID")
    ),
    request_body = UpdateProjectDto,
    responses(
        (status = 200, description = "Project updated", body = ApiResponse<ProjectResponseDto>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required"),
        (status = 404, description = "Project not found"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "projects",
    security(("bearer_auth" = []))
)]
pub async fn update_project(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<ProjectService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateProjectDto>,
) -> Result<Json<ApiResponse<ProjectResponseDto>>> {
    dto.validate()?;

    let project = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(project),
        Some("Project updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/admin/projects/{id}",
    params(
        ("id" = i64, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Project not found")
    ),
    tag = "projects",
    security(("bearer_auth" = []))
)]
pub async fn delete_project(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProjectService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Project deleted".to_string()),
        None,
    )))
}
