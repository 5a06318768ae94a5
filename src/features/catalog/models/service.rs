use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A service offered under exactly one category
#[derive(Debug, Clone, FromRow)]
pub struct Service {
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

/// Column list qualified with the `s` alias so it can be used in joins
pub(crate) const SERVICE_COLUMNS: &str = "s.id, s.category_id, s.name, s.slug, s.description, \
     s.short_description, s.content, s.icon, s.meta_title, s.meta_description, s.is_active, \
     s.sort_order, s.created_at, s.updated_at";
