use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;

use super::content::PageContent;

/// Publication state of a page. Any state may move to any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageStatus::Draft => "draft",
            PageStatus::Published => "published",
            PageStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PageStatus::Draft),
            "published" => Ok(PageStatus::Published),
            "archived" => Ok(PageStatus::Archived),
            other => Err(format!("unknown page status '{}'", other)),
        }
    }
}

impl TryFrom<String> for PageStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Page {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: Option<Json<PageContent>>,
    #[sqlx(try_from = "String")]
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

pub(crate) const PAGE_COLUMNS: &str = "id, title, slug, content, status, meta_title, \
     meta_description, canonical_url, og_title, og_description, og_image, author_id, parent_id, \
     sort_order, view_count, published_at, created_at, updated_at";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        for status in [PageStatus::Draft, PageStatus::Published, PageStatus::Archived] {
            assert_eq!(PageStatus::try_from(status.to_string()).unwrap(), status);
        }
        assert!(PageStatus::try_from("deleted".to_string()).is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(PageStatus::Published).unwrap(),
            serde_json::json!("published")
        );
        assert_eq!(PageStatus::default(), PageStatus::Draft);
    }
}
