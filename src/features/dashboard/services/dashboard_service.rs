use sqlx::MySqlPool;

use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::DashboardStatsDto;

/// Read-only aggregate queries for the admin dashboard
pub struct DashboardService {
    pool: MySqlPool,
}

impl DashboardService {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn get_stats(&self) -> Result<DashboardStatsDto> {
        // Scalar COUNT subqueries keep every column BIGINT
        sqlx::query_as::<_, DashboardStatsDto>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM pages) AS total_pages,
                (SELECT COUNT(*) FROM pages WHERE status = 'published') AS published_pages,
                (SELECT COUNT(*) FROM pages WHERE status = 'draft') AS draft_pages,
                (SELECT COUNT(*) FROM pages WHERE status = 'archived') AS archived_pages,
                (SELECT CAST(COALESCE(SUM(view_count), 0) AS SIGNED) FROM pages) AS total_page_views,
                (SELECT COUNT(*) FROM service_categories) AS service_categories,
                (SELECT COUNT(*) FROM services) AS services,
                (SELECT COUNT(*) FROM features) AS features,
                (SELECT COUNT(*) FROM projects) AS projects,
                (SELECT COUNT(*) FROM projects WHERE is_featured = TRUE) AS featured_projects,
                (SELECT COUNT(*) FROM content_templates) AS templates,
                (SELECT COUNT(*) FROM enquiries WHERE status = 'new') AS new_enquiries,
                (SELECT COUNT(*) FROM enquiries) AS total_enquiries
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load dashboard stats: {:?}", e);
            AppError::Database(e)
        })
    }
}
