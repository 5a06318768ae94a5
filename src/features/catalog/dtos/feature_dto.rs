use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::catalog::models::Feature;
use crate::shared::validation::SLUG_REGEX;

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListFeaturesQuery {
    /// Only features of this service
    pub service_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeatureDto {
    pub service_id: i64,

    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, max = 255, message = "Slug is required"),
        regex(path = *SLUG_REGEX, message = "Slug must contain only lowercase letters, numbers, and hyphens")
    )]
    pub slug: String,

    pub description: Option<String>,
    pub content: Option<String>,
    pub technical_details: Option<String>,
    pub benefits: Option<String>,

    #[validate(length(max = 255))]
    pub meta_title: Option<String>,

    pub meta_description: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeatureDto {
    pub service_id: Option<i64>,

    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: Option<String>,

    #[validate(
        length(min = 1, max = 255, message = "Slug is required"),
        regex(path = *SLUG_REGEX, message = "Slug must contain only lowercase letters, numbers, and hyphens")
    )]
    pub slug: Option<String>,

    pub description: Option<String>,
    pub content: Option<String>,
    pub technical_details: Option<String>,
    pub benefits: Option<String>,

    #[validate(length(max = 255))]
    pub meta_title: Option<String>,

    pub meta_description: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeatureResponseDto {
    pub id: i64,
    pub service_id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub technical_details: Option<String>,
    pub benefits: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Feature> for FeatureResponseDto {
    fn from(f: Feature) -> Self {
        Self {
            id: f.id,
            service_id: f.service_id,
            name: f.name,
            slug: f.slug,
            description: f.description,
            content: f.content,
            technical_details: f.technical_details,
            benefits: f.benefits,
            meta_title: f.meta_title,
            meta_description: f.meta_description,
            is_active: f.is_active,
            sort_order: f.sort_order,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}
