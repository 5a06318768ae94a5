use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Feature detail belonging to one service
#[derive(Debug, Clone, FromRow)]
pub struct Feature {
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

/// Column list qualified with the `f` alias so it can be used in joins
pub(crate) const FEATURE_COLUMNS: &str = "f.id, f.service_id, f.name, f.slug, f.description, \
     f.content, f.technical_details, f.benefits, f.meta_title, f.meta_description, f.is_active, \
     f.sort_order, f.created_at, f.updated_at";
