use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

/// Portfolio entry shown on the public projects pages
#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub demo_url: Option<String>,
    pub technologies: Option<Json<Vec<String>>>,
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

pub(crate) const PROJECT_COLUMNS: &str = "id, title, slug, description, short_description, \
     content, image_url, demo_url, technologies, category, client_name, completion_date, \
     meta_title, meta_description, is_active, is_featured, sort_order, created_at, updated_at";
