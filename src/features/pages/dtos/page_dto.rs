use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::features::pages::models::{Page, PageContent, PageStatus};
use crate::shared::types::SortDirection;
use crate::shared::validation::{validate_url_or_empty, SLUG_REGEX};

pub fn validate_page_content(content: &PageContent) -> Result<(), ValidationError> {
    content.check().map_err(|reason| {
        let mut err = ValidationError::new("content");
        err.message = Some(reason.into());
        err
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageDto {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    #[validate(
        length(min = 1, max = 255, message = "Slug is required"),
        regex(path = *SLUG_REGEX, message = "Slug must contain only lowercase letters, numbers, and hyphens")
    )]
    pub slug: String,

    /// Element tree; when omitted and `templateId` is set the template body is copied
    #[validate(custom(function = "validate_page_content"))]
    #[schema(value_type = Option<Object>)]
    pub content: Option<PageContent>,

    pub status: Option<PageStatus>,

    #[validate(length(max = 255))]
    pub meta_title: Option<String>,

    pub meta_description: Option<String>,

    #[validate(
        length(max = 500),
        custom(function = "validate_url_or_empty")
    )]
    pub canonical_url: Option<String>,

    #[validate(length(max = 255))]
    pub og_title: Option<String>,

    pub og_description: Option<String>,

    #[validate(
        length(max = 500),
        custom(function = "validate_url_or_empty")
    )]
    pub og_image: Option<String>,

    pub parent_id: Option<i64>,

    pub sort_order: Option<i32>,

    pub template_id: Option<i64>,
}

/// Partial page update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePageDto {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: Option<String>,

    #[validate(
        length(min = 1, max = 255, message = "Slug is required"),
        regex(path = *SLUG_REGEX, message = "Slug must contain only lowercase letters, numbers, and hyphens")
    )]
    pub slug: Option<String>,

    #[validate(custom(function = "validate_page_content"))]
    #[schema(value_type = Option<Object>)]
    pub content: Option<PageContent>,

    pub status: Option<PageStatus>,

    #[validate(length(max = 255))]
    pub meta_title: Option<String>,

    pub meta_description: Option<String>,

    #[validate(
        length(max = 500),
        custom(function = "validate_url_or_empty")
    )]
    pub canonical_url: Option<String>,

    #[validate(length(max = 255))]
    pub og_title: Option<String>,

    pub og_description: Option<String>,

    #[validate(
        length(max = 500),
        custom(function = "validate_url_or_empty")
    )]
    pub og_image: Option<String>,

    pub parent_id: Option<i64>,

    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePageStatusDto {
    pub status: PageStatus,
}

/// Columns the page list can be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum PageSortField {
    Title,
    Slug,
    Status,
    CreatedAt,
    #[default]
    UpdatedAt,
    PublishedAt,
    ViewCount,
    SortOrder,
}

impl PageSortField {
    pub fn column(&self) -> &'static str {
        match self {
            PageSortField::Title => "title",
            PageSortField::Slug => "slug",
            PageSortField::Status => "status",
            PageSortField::CreatedAt => "created_at",
            PageSortField::UpdatedAt => "updated_at",
            PageSortField::PublishedAt => "published_at",
            PageSortField::ViewCount => "view_count",
            PageSortField::SortOrder => "sort_order",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQueryParams {
    /// Case-insensitive match on title, slug or meta title
    pub search: Option<String>,
    pub status: Option<PageStatus>,
    pub sort_by: Option<PageSortField>,
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageResponseDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[schema(value_type = Option<Object>)]
    pub content: Option<PageContent>,
    pub status: PageStatus,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub canonical_url: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub author_id: Option<String>,
    pub parent_id: Option<i64>,
    pub sort_order: i32,
    pub view_count: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Page> for PageResponseDto {
    fn from(p: Page) -> Self {
        Self {
            id: p.id,
            title: p.title,
            slug: p.slug,
            content: p.content.map(|c| c.0),
            status: p.status,
            meta_title: p.meta_title,
            meta_description: p.meta_description,
            canonical_url: p.canonical_url,
            og_title: p.og_title,
            og_description: p.og_description,
            og_image: p.og_image,
            author_id: p.author_id,
            parent_id: p.parent_id,
            sort_order: p.sort_order,
            view_count: p.view_count,
            published_at: p.published_at,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn about_us() -> CreatePageDto {
        serde_json::from_value(json!({
            "title": "About Us",
            "slug": "about-us",
            "status": "draft"
        }))
        .unwrap()
    }

    #[test]
    fn accepts_minimal_page() {
        let dto = about_us();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.status, Some(PageStatus::Draft));
        assert!(dto.content.is_none());
    }

    #[test]
    fn empty_title_is_required() {
        let mut dto = about_us();
        dto.title = String::new();
        let errors = dto.validate().unwrap_err();
        let messages = crate::core::error::validation_messages(&errors);
        assert_eq!(messages, vec!["Title is required".to_string()]);
    }

    #[test]
    fn slug_pattern_enforced() {
        for slug in ["About-Us", "about us", "about_us", ""] {
            let mut dto = about_us();
            dto.slug = slug.to_string();
            assert!(dto.validate().is_err(), "{slug:?} should be rejected");
        }
    }

    #[test]
    fn url_fields_accept_empty_or_url() {
        let mut dto = about_us();
        dto.canonical_url = Some(String::new());
        dto.og_image = Some("https://ienet.online/og/about.png".into());
        assert!(dto.validate().is_ok());

        dto.og_image = Some("about.png".into());
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("og_image"));
    }

    #[test]
    fn malformed_content_fails_validation() {
        let dto: CreatePageDto = serde_json::from_value(json!({
            "title": "Broken",
            "slug": "broken",
            "content": { "elements": [
                { "id": "a", "type": "text", "text": "one" },
                { "id": "a", "type": "text", "text": "two" }
            ]}
        }))
        .unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("content"));
    }

    #[test]
    fn query_params_parse_camel_case() {
        let params: PageQueryParams = serde_json::from_value(json!({
            "search": "about",
            "status": "published",
            "sortBy": "viewCount",
            "sort": "asc"
        }))
        .unwrap();
        assert_eq!(params.status, Some(PageStatus::Published));
        assert_eq!(params.sort_by.unwrap().column(), "view_count");
        assert_eq!(params.sort, Some(SortDirection::Asc));
    }
}
