use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::catalog::models::Service;
use crate::shared::validation::SLUG_REGEX;

/// Query params for the public services list
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListServicesQuery {
    /// Only services in this category
    pub category_id: Option<i64>,
    /// Only services in the category with this slug
    pub category_slug: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceDto {
    pub category_id: i64,

    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, max = 255, message = "Slug is required"),
        regex(path = *SLUG_REGEX, message = "Slug must contain only lowercase letters, numbers, and hyphens")
    )]
    pub slug: String,

    pub description: Option<String>,

    #[validate(length(max = 500))]
    pub short_description: Option<String>,

    pub content: Option<String>,

    #[validate(length(max = 100))]
    pub icon: Option<String>,

    #[validate(length(max = 255))]
    pub meta_title: Option<String>,

    pub meta_description: Option<String>,

    pub is_active: Option<bool>,

    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceDto {
    pub category_id: Option<i64>,

    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: Option<String>,

    #[validate(
        length(min = 1, max = 255, message = "Slug is required"),
        regex(path = *SLUG_REGEX, message = "Slug must contain only lowercase letters, numbers, and hyphens")
    )]
    pub slug: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 500))]
    pub short_description: Option<String>,

    pub content: Option<String>,

    #[validate(length(max = 100))]
    pub icon: Option<String>,

    #[validate(length(max = 255))]
    pub meta_title: Option<String>,

    pub meta_description: Option<String>,

    pub is_active: Option<bool>,

    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponseDto {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub content: Option<String>,
    pub icon: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Service> for ServiceResponseDto {
    fn from(s: Service) -> Self {
        Self {
            id: s.id,
            category_id: s.category_id,
            name: s.name,
            slug: s.slug,
            description: s.description,
            short_description: s.short_description,
            content: s.content,
            icon: s.icon,
            meta_title: s.meta_title,
            meta_description: s.meta_description,
            is_active: s.is_active,
            sort_order: s.sort_order,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_description_is_bounded() {
        let dto = UpdateServiceDto {
            short_description: Some("x".repeat(501)),
            ..Default::default()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("short_description"));
    }

    #[test]
    fn list_query_reads_camel_case() {
        let query: ListServicesQuery =
            serde_json::from_value(serde_json::json!({ "categorySlug": "web-hosting" })).unwrap();
        assert_eq!(query.category_slug.as_deref(), Some("web-hosting"));
        assert_eq!(query.category_id, None);
    }
}
