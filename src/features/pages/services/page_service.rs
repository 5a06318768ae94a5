use std::collections::BTreeSet;

use sqlx::types::Json;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::pages::dtos::{
    BulkPageAction, BulkPageActionDto, BulkPageResultDto, CreatePageDto, PageQueryParams,
    PageResponseDto, UpdatePageDto,
};
use crate::features::pages::models::{Page, PageContent, PageStatus, PAGE_COLUMNS};
use crate::shared::validation::blank_to_none;

const SLUG_TAKEN: &str = "A page with this slug already exists";
const UNKNOWN_PARENT: &str = "Parent page does not exist";

pub struct PageService {
    pool: MySqlPool,
}

impl PageService {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// List pages with optional search, status filter and ordering
    pub async fn list(&self, params: &PageQueryParams) -> Result<Vec<PageResponseDto>> {
        let mut builder =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM pages WHERE 1 = 1", PAGE_COLUMNS));

        if let Some(search) = params.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", escape_like(search));
            builder
                .push(" AND (title LIKE ")
                .push_bind(pattern.clone())
                .push(" OR slug LIKE ")
                .push_bind(pattern.clone())
                .push(" OR meta_title LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(status) = params.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }

        let sort_by = params.sort_by.unwrap_or_default();
        let direction = params.sort.unwrap_or_default();
        builder.push(format!(
            " ORDER BY {} {}, id {}",
            sort_by.column(),
            direction.as_sql(),
            direction.as_sql()
        ));

        let pages = builder
            .build_query_as::<Page>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list pages: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(pages.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<PageResponseDto> {
        let sql = format!("SELECT {} FROM pages WHERE id = ?", PAGE_COLUMNS);
        sqlx::query_as::<_, Page>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get page {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Page {} not found", id)))
    }

    /// Fetch a published page for public rendering and count the view
    pub async fn get_published_by_slug(&self, slug: &str) -> Result<PageResponseDto> {
        let result = sqlx::query(
            "UPDATE pages SET view_count = view_count + 1, updated_at = updated_at \
             WHERE slug = ? AND status = 'published'",
        )
        .bind(slug)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to record page view for {}: {:?}", slug, e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Page not found".to_string()));
        }

        let sql = format!(
            "SELECT {} FROM pages WHERE slug = ? AND status = 'published'",
            PAGE_COLUMNS
        );
        sqlx::query_as::<_, Page>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Page not found".to_string()))
    }

    async fn slug_in_use(&self, slug: &str, except_id: Option<i64>) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pages WHERE slug = ? AND id <> ?")
            .bind(slug)
            .bind(except_id.unwrap_or(0))
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(count > 0)
    }

    async fn ensure_parent_exists(&self, parent_id: i64) -> Result<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pages WHERE id = ?")
            .bind(parent_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if count > 0 {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!(
                "Parent page {} does not exist",
                parent_id
            )))
        }
    }

    /// Template body with every element id regenerated
    async fn template_content(&self, template_id: i64) -> Result<PageContent> {
        let content: Option<Json<PageContent>> = sqlx::query_scalar(
            "SELECT content FROM content_templates WHERE id = ? AND is_active = TRUE",
        )
        .bind(template_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load template {}: {:?}", template_id, e);
            AppError::Database(e)
        })?;

        content
            .map(|Json(content)| content.with_fresh_ids())
            .ok_or_else(|| AppError::BadRequest(format!("Template {} does not exist", template_id)))
    }

    pub async fn create(
        &self,
        dto: CreatePageDto,
        author: &AuthenticatedUser,
    ) -> Result<PageResponseDto> {
        if self.slug_in_use(&dto.slug, None).await? {
            return Err(AppError::Conflict(SLUG_TAKEN.to_string()));
        }
        if let Some(parent_id) = dto.parent_id {
            self.ensure_parent_exists(parent_id).await?;
        }

        let content = match (dto.content, dto.template_id) {
            (Some(content), _) => Some(content),
            (None, Some(template_id)) => Some(self.template_content(template_id).await?),
            (None, None) => None,
        };
        let status = dto.status.unwrap_or_default();

        let result = sqlx::query(
            r#"
            INSERT INTO pages
                (title, slug, content, status, meta_title, meta_description, canonical_url,
                 og_title, og_description, og_image, author_id, parent_id, sort_order, published_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?,
                    CASE WHEN ? = 'published' THEN CURRENT_TIMESTAMP ELSE NULL END)
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.slug)
        .bind(content.map(Json))
        .bind(status.as_str())
        .bind(blank_to_none(dto.meta_title))
        .bind(blank_to_none(dto.meta_description))
        .bind(blank_to_none(dto.canonical_url))
        .bind(blank_to_none(dto.og_title))
        .bind(blank_to_none(dto.og_description))
        .bind(blank_to_none(dto.og_image))
        .bind(&author.sub)
        .bind(dto.parent_id)
        .bind(dto.sort_order.unwrap_or(0))
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, SLUG_TAKEN, UNKNOWN_PARENT))?;

        let id = result.last_insert_id() as i64;
        tracing::info!("Page {} ({}) created by {}", id, dto.slug, author.sub);
        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i64, dto: UpdatePageDto) -> Result<PageResponseDto> {
        if let Some(slug) = &dto.slug {
            if self.slug_in_use(slug, Some(id)).await? {
                return Err(AppError::Conflict(SLUG_TAKEN.to_string()));
            }
        }
        if let Some(parent_id) = dto.parent_id {
            if parent_id == id {
                return Err(AppError::BadRequest(
                    "A page cannot be its own parent".to_string(),
                ));
            }
            self.ensure_parent_exists(parent_id).await?;
        }

        // MySQL assigns left to right: published_at must read the old status.
        // SEO fields: NULL keeps the stored value, blank clears it.
        let status = dto.status.map(|s| s.as_str());
        sqlx::query(
            r#"
            UPDATE pages
            SET published_at = CASE
                    WHEN ? = 'published' AND status <> 'published' THEN CURRENT_TIMESTAMP
                    ELSE published_at
                END,
                title = COALESCE(?, title),
                slug = COALESCE(?, slug),
                content = COALESCE(?, content),
                status = COALESCE(?, status),
                meta_title = NULLIF(COALESCE(?, meta_title), ''),
                meta_description = NULLIF(COALESCE(?, meta_description), ''),
                canonical_url = NULLIF(COALESCE(?, canonical_url), ''),
                og_title = NULLIF(COALESCE(?, og_title), ''),
                og_description = NULLIF(COALESCE(?, og_description), ''),
                og_image = NULLIF(COALESCE(?, og_image), ''),
                parent_id = COALESCE(?, parent_id),
                sort_order = COALESCE(?, sort_order),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(status)
        .bind(dto.title)
        .bind(dto.slug)
        .bind(dto.content.map(Json))
        .bind(status)
        .bind(dto.meta_title)
        .bind(dto.meta_description)
        .bind(dto.canonical_url)
        .bind(dto.og_title)
        .bind(dto.og_description)
        .bind(dto.og_image)
        .bind(dto.parent_id)
        .bind(dto.sort_order)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, SLUG_TAKEN, UNKNOWN_PARENT))?;

        tracing::info!("Page {} updated", id);
        self.get_by_id(id).await
    }

    pub async fn update_status(&self, id: i64, status: PageStatus) -> Result<PageResponseDto> {
        sqlx::query(
            r#"
            UPDATE pages
            SET published_at = CASE
                    WHEN ? = 'published' AND status <> 'published' THEN CURRENT_TIMESTAMP
                    ELSE published_at
                END,
                status = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(status.as_str())
        .bind(status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update status of page {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        let page = self.get_by_id(id).await?;
        tracing::info!("Page {} is now {}", id, status);
        Ok(page)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete page {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Page {} not found", id)));
        }

        tracing::info!("Page {} deleted", id);
        Ok(())
    }

    /// Apply one action to many pages in a single transaction
    pub async fn bulk(&self, dto: BulkPageActionDto) -> Result<BulkPageResultDto> {
        let requested: BTreeSet<i64> = dto.page_ids.iter().copied().collect();

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let mut select = QueryBuilder::<MySql>::new("SELECT id FROM pages WHERE id IN (");
        push_id_list(&mut select, &requested);
        select.push(") FOR UPDATE");
        let existing: BTreeSet<i64> = select
            .build_query_scalar::<i64>()
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .into_iter()
            .collect();

        if !existing.is_empty() {
            let mut statement = match dto.action {
                BulkPageAction::Publish => QueryBuilder::<MySql>::new(
                    "UPDATE pages SET published_at = CASE WHEN status <> 'published' \
                     THEN CURRENT_TIMESTAMP ELSE published_at END, status = 'published', \
                     updated_at = CURRENT_TIMESTAMP WHERE id IN (",
                ),
                BulkPageAction::Unpublish => QueryBuilder::<MySql>::new(
                    "UPDATE pages SET status = 'draft', updated_at = CURRENT_TIMESTAMP WHERE id IN (",
                ),
                BulkPageAction::Archive => QueryBuilder::<MySql>::new(
                    "UPDATE pages SET status = 'archived', updated_at = CURRENT_TIMESTAMP WHERE id IN (",
                ),
                BulkPageAction::Delete => {
                    QueryBuilder::<MySql>::new("DELETE FROM pages WHERE id IN (")
                }
            };
            push_id_list(&mut statement, &existing);
            statement.push(")");
            statement
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!("Bulk {} failed: {:?}", dto.action.as_str(), e);
                    AppError::Database(e)
                })?;
        }

        tx.commit().await.map_err(AppError::Database)?;

        let missing: Vec<i64> = requested.difference(&existing).copied().collect();
        tracing::info!(
            "Bulk {} applied to {} pages ({} missing)",
            dto.action.as_str(),
            existing.len(),
            missing.len()
        );

        Ok(BulkPageResultDto {
            action: dto.action,
            affected: existing.into_iter().collect(),
            missing,
        })
    }
}

/// Escape `LIKE` wildcards so the term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_id_list(builder: &mut QueryBuilder<'_, MySql>, ids: &BTreeSet<i64>) {
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::pages::models::{Block, Element};
    use crate::shared::constants::ROLE_EDITOR;
    use crate::shared::test_helpers::user_with_roles;

    fn new_page(title: &str, slug: &str) -> CreatePageDto {
        CreatePageDto {
            title: title.to_string(),
            slug: slug.to_string(),
            content: None,
            status: None,
            meta_title: None,
            meta_description: None,
            canonical_url: None,
            og_title: None,
            og_description: None,
            og_image: None,
            parent_id: None,
            sort_order: None,
            template_id: None,
        }
    }

    /// Stored state without the bookkeeping timestamp every write bumps
    fn stored_state(page: &PageResponseDto) -> serde_json::Value {
        let mut value = serde_json::to_value(page).unwrap();
        value.as_object_mut().unwrap().remove("updatedAt");
        value
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("web_hosting"), "web\\_hosting");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("about us"), "about us");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a MySQL server (DATABASE_URL)"]
    async fn about_us_is_created_as_draft_then_published(pool: MySqlPool) {
        let service = PageService::new(pool);
        let editor = user_with_roles(&[ROLE_EDITOR]);

        let mut dto = new_page("About Us", "about-us");
        dto.status = Some(PageStatus::Draft);
        let created = service.create(dto, &editor).await.unwrap();
        assert_eq!(created.status, PageStatus::Draft);
        assert!(created.published_at.is_none());

        let listed = service.list(&PageQueryParams::default()).await.unwrap();
        assert!(listed.iter().any(|p| p.id == created.id));

        let published = service
            .update_status(created.id, PageStatus::Published)
            .await
            .unwrap();
        assert_eq!(published.status, PageStatus::Published);
        assert!(published.published_at.is_some());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a MySQL server (DATABASE_URL)"]
    async fn created_page_reads_back_unchanged(pool: MySqlPool) {
        let service = PageService::new(pool);
        let editor = user_with_roles(&[ROLE_EDITOR]);

        let mut dto = new_page("Web Hosting", "web-hosting");
        dto.content = Some(PageContent::new(vec![Element::new(Block::Heading {
            text: "Fast hosting".into(),
            level: 1,
        })]));
        dto.meta_title = Some("Web Hosting | IeNet".into());
        dto.canonical_url = Some("https://ienet.example/web-hosting".into());
        let created = service.create(dto.clone(), &editor).await.unwrap();

        let fetched = service.get_by_id(created.id).await.unwrap();
        assert_eq!(stored_state(&fetched), stored_state(&created));
        assert_eq!(fetched.title, dto.title);
        assert_eq!(fetched.content, dto.content);
        assert_eq!(fetched.meta_title, dto.meta_title);
        assert_eq!(fetched.author_id.as_deref(), Some("test-sub"));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a MySQL server (DATABASE_URL)"]
    async fn repeated_update_of_published_page_keeps_publish_time(pool: MySqlPool) {
        let service = PageService::new(pool.clone());
        let editor = user_with_roles(&[ROLE_EDITOR]);

        let mut dto = new_page("Careers", "careers");
        dto.status = Some(PageStatus::Published);
        let created = service.create(dto, &editor).await.unwrap();

        // Move the publish time into the past so a re-stamp would show
        sqlx::query("UPDATE pages SET published_at = '2024-01-01 00:00:00' WHERE id = ?")
            .bind(created.id)
            .execute(&pool)
            .await
            .unwrap();
        let before = service.get_by_id(created.id).await.unwrap();

        let update = UpdatePageDto {
            title: Some("Careers at IeNet".into()),
            status: Some(PageStatus::Published),
            ..Default::default()
        };
        let first = service.update(created.id, update.clone()).await.unwrap();
        let second = service.update(created.id, update).await.unwrap();

        assert_eq!(first.published_at, before.published_at);
        assert_eq!(stored_state(&first), stored_state(&second));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a MySQL server (DATABASE_URL)"]
    async fn blank_seo_field_clears_and_absent_field_keeps(pool: MySqlPool) {
        let service = PageService::new(pool);
        let editor = user_with_roles(&[ROLE_EDITOR]);

        let mut dto = new_page("Contact", "contact");
        dto.meta_title = Some("Old title".into());
        dto.og_title = Some("Say hello".into());
        let created = service.create(dto, &editor).await.unwrap();

        let update = UpdatePageDto {
            meta_title: Some(String::new()),
            ..Default::default()
        };
        let updated = service.update(created.id, update).await.unwrap();

        assert_eq!(updated.meta_title, None);
        assert_eq!(updated.og_title.as_deref(), Some("Say hello"));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a MySQL server (DATABASE_URL)"]
    async fn duplicate_slug_is_a_conflict(pool: MySqlPool) {
        let service = PageService::new(pool);
        let editor = user_with_roles(&[ROLE_EDITOR]);

        service.create(new_page("Pricing", "pricing"), &editor).await.unwrap();
        let err = service
            .create(new_page("Pricing copy", "pricing"), &editor)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a MySQL server (DATABASE_URL)"]
    async fn public_fetch_counts_views_of_published_pages_only(pool: MySqlPool) {
        let service = PageService::new(pool);
        let editor = user_with_roles(&[ROLE_EDITOR]);

        let mut published = new_page("Services", "services");
        published.status = Some(PageStatus::Published);
        service.create(published, &editor).await.unwrap();
        service.create(new_page("Draft", "draft"), &editor).await.unwrap();

        service.get_published_by_slug("services").await.unwrap();
        let page = service.get_published_by_slug("services").await.unwrap();
        assert_eq!(page.view_count, 2);

        let err = service.get_published_by_slug("draft").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a MySQL server (DATABASE_URL)"]
    async fn search_treats_wildcards_literally(pool: MySqlPool) {
        let service = PageService::new(pool);
        let editor = user_with_roles(&[ROLE_EDITOR]);

        service
            .create(new_page("100% Uptime", "uptime-guarantee"), &editor)
            .await
            .unwrap();
        service
            .create(new_page("Uptime 1000", "uptime-record"), &editor)
            .await
            .unwrap();

        let params = PageQueryParams {
            search: Some("100%".into()),
            ..Default::default()
        };
        let found = service.list(&params).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].slug, "uptime-guarantee");
    }
}
