use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::catalog::models::ServiceCategory;
use crate::shared::validation::SLUG_REGEX;

/// Request DTO for creating a service category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceCategoryDto {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, max = 255, message = "Slug is required"),
        regex(path = *SLUG_REGEX, message = "Slug must contain only lowercase letters, numbers, and hyphens")
    )]
    pub slug: String,

    pub description: Option<String>,

    #[validate(length(max = 100))]
    pub icon: Option<String>,

    #[validate(length(max = 50))]
    pub color: Option<String>,

    #[validate(length(max = 255))]
    pub meta_title: Option<String>,

    pub meta_description: Option<String>,

    pub is_active: Option<bool>,

    pub sort_order: Option<i32>,
}

/// Request DTO for updating a service category; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceCategoryDto {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: Option<String>,

    #[validate(
        length(min = 1, max = 255, message = "Slug is required"),
        regex(path = *SLUG_REGEX, message = "Slug must contain only lowercase letters, numbers, and hyphens")
    )]
    pub slug: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 100))]
    pub icon: Option<String>,

    #[validate(length(max = 50))]
    pub color: Option<String>,

    #[validate(length(max = 255))]
    pub meta_title: Option<String>,

    pub meta_description: Option<String>,

    pub is_active: Option<bool>,

    pub sort_order: Option<i32>,
}

/// Response DTO for service category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCategoryResponseDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ServiceCategory> for ServiceCategoryResponseDto {
    fn from(c: ServiceCategory) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            icon: c.icon,
            color: c.color,
            meta_title: c.meta_title,
            meta_description: c.meta_description,
            is_active: c.is_active,
            sort_order: c.sort_order,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
