use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Top-level grouping of the service catalog
#[derive(Debug, Clone, FromRow)]
pub struct ServiceCategory {
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

pub(crate) const SERVICE_CATEGORY_COLUMNS: &str = "id, name, slug, description, icon, color, \
     meta_title, meta_description, is_active, sort_order, created_at, updated_at";
