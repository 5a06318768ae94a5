use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireEditor;
use crate::features::enquiries::dtos::{
    CreateEnquiryDto, EnquiryReceiptDto, EnquiryResponseDto, ListEnquiriesQuery, UpdateEnquiryDto,
};
use crate::features::enquiries::services::EnquiryService;
use crate::shared::types::ApiResponse;

/// Submit the public contact form
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = CreateEnquiryDto,
    responses(
        (status = 201, description = "Enquiry stored", body = ApiResponse<EnquiryReceiptDto>),
        (status = 400, description = "Validation failed")
    ),
    tag = "enquiries"
)]
pub async fn submit_enquiry(
    State(service): State<Arc<EnquiryService>>,
    AppJson(dto): AppJson<CreateEnquiryDto>,
) -> Result<(StatusCode, Json<ApiResponse<EnquiryReceiptDto>>)> {
    dto.validate()?;

    let id = service.submit(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(EnquiryReceiptDto { id }),
            Some("Enquiry submitted successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/enquiries",
    params(ListEnquiriesQuery),
    responses(
        (status = 200, description = "Enquiries, newest first", body = ApiResponse<Vec<EnquiryResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required")
    ),
    tag = "enquiries",
    security(("bearer_auth" = []))
)]
pub async fn list_enquiries(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<EnquiryService>>,
    AppQuery(query): AppQuery<ListEnquiriesQuery>,
) -> Result<Json<ApiResponse<Vec<EnquiryResponseDto>>>> {
    let enquiries = service.list(&query).await?;
    Ok(Json(ApiResponse::collection(enquiries)))
}

#[utoipa::path(
    put,
    path = "/api/admin/enquiries/{id}",
    params(
        ("id" = i64, Path, description = "Enquiry ID")
    ),
    request_body = UpdateEnquiryDto,
    responses(
        (status = 200, description = "Enquiry updated", body = ApiResponse<EnquiryResponseDto>),
        (status = 400, description = "Unknown status"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Editor role required"),
        (status = 404, description = "Enquiry not found")
    ),
    tag = "enquiries",
    security(("bearer_auth" = []))
)]
pub async fn update_enquiry(
    RequireEditor(_user): RequireEditor,
    State(service): State<Arc<EnquiryService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateEnquiryDto>,
) -> Result<Json<ApiResponse<EnquiryResponseDto>>> {
    let enquiry = service.update_status(id, dto.status).await?;
    Ok(Json(ApiResponse::success(Some(enquiry), None, None)))
}
