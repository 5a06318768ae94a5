use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Content and pipeline counts for the admin dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    pub total_pages: i64,
    pub published_pages: i64,
    pub draft_pages: i64,
    pub archived_pages: i64,
    pub total_page_views: i64,
    pub service_categories: i64,
    pub services: i64,
    pub features: i64,
    pub projects: i64,
    pub featured_projects: i64,
    pub templates: i64,
    pub new_enquiries: i64,
    pub total_enquiries: i64,
}
