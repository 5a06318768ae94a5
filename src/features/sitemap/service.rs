use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use super::render::{render_sitemap, ChangeFreq, SitemapUrl};
use crate::core::error::{AppError, Result};

/// Fixed marketing routes served by the frontend
const STATIC_PATHS: &[(&str, ChangeFreq, &str)] = &[
    ("/", ChangeFreq::Weekly, "1.0"),
    ("/services", ChangeFreq::Weekly, "0.9"),
    ("/projects", ChangeFreq::Weekly, "0.8"),
    ("/about", ChangeFreq::Monthly, "0.7"),
    ("/contact", ChangeFreq::Monthly, "0.7"),
];

pub struct SitemapService {
    pool: MySqlPool,
    base_url: String,
}

impl SitemapService {
    pub fn new(pool: MySqlPool, base_url: String) -> Self {
        Self { pool, base_url }
    }

    /// Every public URL: static routes, the active catalog tree, active
    /// projects and published pages
    pub async fn collect_urls(&self) -> Result<Vec<SitemapUrl>> {
        let base = self.base_url.as_str();
        let mut urls: Vec<SitemapUrl> = STATIC_PATHS
            .iter()
            .map(|(path, freq, priority)| SitemapUrl::new(base, path, None, *freq, priority))
            .collect();

        let categories = sqlx::query_as::<_, (String, DateTime<Utc>)>(
            "SELECT slug, updated_at FROM service_categories WHERE is_active = TRUE \
             ORDER BY sort_order, name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(log_db_error)?;
        urls.extend(categories.into_iter().map(|(slug, updated)| {
            SitemapUrl::new(
                base,
                &format!("/services/{}", slug),
                Some(updated),
                ChangeFreq::Weekly,
                "0.8",
            )
        }));

        let services = sqlx::query_as::<_, (String, String, DateTime<Utc>)>(
            "SELECT c.slug, s.slug, s.updated_at FROM services s \
             JOIN service_categories c ON c.id = s.category_id \
             WHERE s.is_active = TRUE AND c.is_active = TRUE \
             ORDER BY c.sort_order, s.sort_order, s.name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(log_db_error)?;
        urls.extend(services.into_iter().map(|(category, service, updated)| {
            SitemapUrl::new(
                base,
                &format!("/services/{}/{}", category, service),
                Some(updated),
                ChangeFreq::Weekly,
                "0.7",
            )
        }));

        let features = sqlx::query_as::<_, (String, String, String, DateTime<Utc>)>(
            "SELECT c.slug, s.slug, f.slug, f.updated_at FROM features f \
             JOIN services s ON s.id = f.service_id \
             JOIN service_categories c ON c.id = s.category_id \
             WHERE f.is_active = TRUE AND s.is_active = TRUE AND c.is_active = TRUE \
             ORDER BY c.sort_order, s.sort_order, f.sort_order, f.name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(log_db_error)?;
        urls.extend(features.into_iter().map(|(category, service, feature, updated)| {
            SitemapUrl::new(
                base,
                &format!("/services/{}/{}/{}", category, service, feature),
                Some(updated),
                ChangeFreq::Monthly,
                "0.6",
            )
        }));

        let projects = sqlx::query_as::<_, (String, DateTime<Utc>)>(
            "SELECT slug, updated_at FROM projects WHERE is_active = TRUE ORDER BY sort_order, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(log_db_error)?;
        urls.extend(projects.into_iter().map(|(slug, updated)| {
            SitemapUrl::new(
                base,
                &format!("/projects/{}", slug),
                Some(updated),
                ChangeFreq::Monthly,
                "0.6",
            )
        }));

        let pages = sqlx::query_as::<_, (String, DateTime<Utc>)>(
            "SELECT slug, updated_at FROM pages WHERE status = 'published' ORDER BY sort_order, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(log_db_error)?;
        urls.extend(pages.into_iter().map(|(slug, updated)| {
            SitemapUrl::new(
                base,
                &format!("/{}", slug),
                Some(updated),
                ChangeFreq::Monthly,
                "0.5",
            )
        }));

        Ok(urls)
    }

    pub async fn render(&self) -> Result<String> {
        let urls = self.collect_urls().await?;
        tracing::debug!("Rendering sitemap with {} urls", urls.len());
        render_sitemap(&urls).map_err(|e| AppError::Internal(format!("Sitemap render failed: {}", e)))
    }
}

fn log_db_error(e: sqlx::Error) -> AppError {
    tracing::error!("Failed to load sitemap rows: {:?}", e);
    AppError::Database(e)
}
