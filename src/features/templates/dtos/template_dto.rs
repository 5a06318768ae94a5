use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::pages::dtos::validate_page_content;
use crate::features::pages::models::PageContent;
use crate::features::templates::models::ContentTemplate;
use crate::shared::validation::validate_url_or_empty;

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TemplateQuery {
    /// Only templates in this category (e.g. "landing", "service")
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateDto {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_page_content"))]
    #[schema(value_type = Object)]
    pub content: PageContent,

    #[validate(length(max = 100))]
    pub category: Option<String>,

    #[validate(length(max = 500), custom(function = "validate_url_or_empty"))]
    pub thumbnail: Option<String>,

    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateDto {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = "validate_page_content"))]
    #[schema(value_type = Option<Object>)]
    pub content: Option<PageContent>,

    #[validate(length(max = 100))]
    pub category: Option<String>,

    #[validate(length(max = 500), custom(function = "validate_url_or_empty"))]
    pub thumbnail: Option<String>,

    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResponseDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = Object)]
    pub content: PageContent,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContentTemplate> for TemplateResponseDto {
    fn from(t: ContentTemplate) -> Self {
        Self {
            id: t.id,
            name: t.name,
            description: t.description,
            content: t.content.0,
            category: t.category,
            thumbnail: t.thumbnail,
            is_active: t.is_active,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_requires_content() {
        let result = serde_json::from_value::<CreateTemplateDto>(json!({ "name": "Landing" }));
        assert!(result.is_err());
    }

    #[test]
    fn create_validates_name_and_thumbnail() {
        let mut dto: CreateTemplateDto = serde_json::from_value(json!({
            "name": "Service landing",
            "category": "landing",
            "content": { "elements": [
                { "id": "hero", "type": "hero", "heading": "Managed IT Services",
                  "ctaLabel": "Get a quote", "ctaHref": "/contact" }
            ]}
        }))
        .unwrap();
        assert!(dto.validate().is_ok());

        dto.name = String::new();
        dto.thumbnail = Some("thumb.png".into());
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("thumbnail"));
    }
}
