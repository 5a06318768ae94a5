use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::projects::models::Project;
use crate::shared::validation::{validate_url_or_empty, SLUG_REGEX};

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListProjectsQuery {
    /// `true` for featured projects only, `false` for the rest
    pub featured: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectDto {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    #[validate(
        length(min = 1, max = 255, message = "Slug is required"),
        regex(path = *SLUG_REGEX, message = "Slug must contain only lowercase letters, numbers, and hyphens")
    )]
    pub slug: String,

    pub description: Option<String>,

    #[validate(length(max = 500))]
    pub short_description: Option<String>,

    pub content: Option<String>,

    #[validate(length(max = 500), custom(function = "validate_url_or_empty"))]
    pub image_url: Option<String>,

    #[validate(length(max = 500), custom(function = "validate_url_or_empty"))]
    pub demo_url: Option<String>,

    #[serde(default)]
    pub technologies: Vec<String>,

    #[validate(length(max = 100))]
    pub category: Option<String>,

    #[validate(length(max = 255))]
    pub client_name: Option<String>,

    pub completion_date: Option<DateTime<Utc>>,

    #[validate(length(max = 255))]
    pub meta_title: Option<String>,

    pub meta_description: Option<String>,

    pub is_active: Option<bool>,

    pub is_featured: Option<bool>,

    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectDto {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: Option<String>,

    #[validate(
        length(min = 1, max = 255, message = "Slug is required"),
        regex(path = *SLUG_REGEX, message = "Slug must contain only lowercase letters, numbers, and hyphens")
    )]
    pub slug: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 500))]
    pub short_description: Option<String>,

    pub content: Option<String>,

    #[validate(length(max = 500), custom(function = "validate_url_or_empty"))]
    pub image_url: Option<String>,

    #[validate(length(max = 500), custom(function = "validate_url_or_empty"))]
    pub demo_url: Option<String>,

    pub technologies: Option<Vec<String>>,

    #[validate(length(max = 100))]
    pub category: Option<String>,

    #[validate(length(max = 255))]
    pub client_name: Option<String>,

    pub completion_date: Option<DateTime<Utc>>,

    #[validate(length(max = 255))]
    pub meta_title: Option<String>,

    pub meta_description: Option<String>,

    pub is_active: Option<bool>,

    pub is_featured: Option<bool>,

    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponseDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub demo_url: Option<String>,
    pub technologies: Vec<String>,
    pub category: Option<String>,
    pub client_name: Option<String>,
    pub completion_date: Option<DateTime<Utc>>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponseDto {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            title: p.title,
            slug: p.slug,
            description: p.description,
            short_description: p.short_description,
            content: p.content,
            image_url: p.image_url,
            demo_url: p.demo_url,
            technologies: p.technologies.map(|t| t.0).unwrap_or_default(),
            category: p.category,
            client_name: p.client_name,
            completion_date: p.completion_date,
            meta_title: p.meta_title,
            meta_description: p.meta_description,
            is_active: p.is_active,
            is_featured: p.is_featured,
            sort_order: p.sort_order,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn technologies_default_to_empty() {
        let dto: CreateProjectDto = serde_json::from_value(json!({
            "title": "Retail Analytics Platform",
            "slug": "retail-analytics-platform",
            "demoUrl": "https://demo.ienet.online/retail"
        }))
        .unwrap();
        assert!(dto.technologies.is_empty());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn demo_url_must_be_url() {
        let dto: CreateProjectDto = serde_json::from_value(json!({
            "title": "Clinic Booking",
            "slug": "clinic-booking",
            "demoUrl": "demo.example"
        }))
        .unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("demo_url"));
    }
}
