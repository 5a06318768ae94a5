use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::features::pages::models::PageContent;

/// Reusable element tree that new pages can start from
#[derive(Debug, Clone, FromRow)]
pub struct ContentTemplate {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub content: Json<PageContent>,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub(crate) const TEMPLATE_COLUMNS: &str =
    "id, name, description, content, category, thumbnail, is_active, created_at, updated_at";
