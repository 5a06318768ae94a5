use sqlx::MySqlPool;

use crate::core::error::{AppError, Result};
use crate::features::catalog::dtos::{
    CreateServiceCategoryDto, ServiceCategoryResponseDto, UpdateServiceCategoryDto,
};
use crate::features::catalog::models::{ServiceCategory, SERVICE_CATEGORY_COLUMNS};
use crate::shared::validation::blank_to_none;

const SLUG_TAKEN: &str = "A service category with this slug already exists";
const HAS_SERVICES: &str = "Service category still has services; delete or move them first";

/// Service for service-category operations
pub struct CategoryService {
    pool: MySqlPool,
}

impl CategoryService {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// List active categories in display order
    pub async fn list_active(&self) -> Result<Vec<ServiceCategoryResponseDto>> {
        let query = format!(
            "SELECT {} FROM service_categories WHERE is_active = TRUE ORDER BY sort_order, name",
            SERVICE_CATEGORY_COLUMNS
        );
        let categories = sqlx::query_as::<_, ServiceCategory>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list service categories: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(categories.into_iter().map(Into::into).collect())
    }

    /// List every category, including inactive ones (admin screens)
    pub async fn list_all(&self) -> Result<Vec<ServiceCategoryResponseDto>> {
        let query = format!(
            "SELECT {} FROM service_categories ORDER BY sort_order, name",
            SERVICE_CATEGORY_COLUMNS
        );
        let categories = sqlx::query_as::<_, ServiceCategory>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list service categories: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(categories.into_iter().map(Into::into).collect())
    }

    /// Get an active category by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<ServiceCategoryResponseDto> {
        let query = format!(
            "SELECT {} FROM service_categories WHERE slug = ? AND is_active = TRUE",
            SERVICE_CATEGORY_COLUMNS
        );
        sqlx::query_as::<_, ServiceCategory>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get service category by slug: {:?}", e);
                AppError::Database(e)
            })?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Service category not found".to_string()))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ServiceCategoryResponseDto> {
        self.find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Service category {} not found", id)))
    }

    pub(crate) async fn find_by_id(&self, id: i64) -> Result<Option<ServiceCategory>> {
        let query = format!(
            "SELECT {} FROM service_categories WHERE id = ?",
            SERVICE_CATEGORY_COLUMNS
        );
        sqlx::query_as::<_, ServiceCategory>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get service category {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    pub async fn create(&self, dto: CreateServiceCategoryDto) -> Result<ServiceCategoryResponseDto> {
        let result = sqlx::query(
            r#"
            INSERT INTO service_categories
                (name, slug, description, icon, color, meta_title, meta_description, is_active, sort_order)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.slug)
        .bind(blank_to_none(dto.description))
        .bind(blank_to_none(dto.icon))
        .bind(blank_to_none(dto.color))
        .bind(blank_to_none(dto.meta_title))
        .bind(blank_to_none(dto.meta_description))
        .bind(dto.is_active.unwrap_or(true))
        .bind(dto.sort_order.unwrap_or(0))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, SLUG_TAKEN, SLUG_TAKEN))?;

        let id = result.last_insert_id() as i64;
        tracing::info!("Created service category {} ({})", id, dto.slug);
        self.get_by_id(id).await
    }

    pub async fn update(
        &self,
        id: i64,
        dto: UpdateServiceCategoryDto,
    ) -> Result<ServiceCategoryResponseDto> {
        sqlx::query(
            r#"
            UPDATE service_categories
            SET name = COALESCE(?, name),
                slug = COALESCE(?, slug),
                description = COALESCE(?, description),
                icon = COALESCE(?, icon),
                color = COALESCE(?, color),
                meta_title = COALESCE(?, meta_title),
                meta_description = COALESCE(?, meta_description),
                is_active = COALESCE(?, is_active),
                sort_order = COALESCE(?, sort_order),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(dto.name)
        .bind(dto.slug)
        .bind(dto.description)
        .bind(dto.icon)
        .bind(dto.color)
        .bind(dto.meta_title)
        .bind(dto.meta_description)
        .bind(dto.is_active)
        .bind(dto.sort_order)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, SLUG_TAKEN, SLUG_TAKEN))?;

        tracing::info!("Updated service category {}", id);
        self.get_by_id(id).await
    }

    /// Delete a category. Refused while services still reference it.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let dependents: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM services WHERE category_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if dependents > 0 {
            return Err(AppError::Conflict(HAS_SERVICES.to_string()));
        }

        let result = sqlx::query("DELETE FROM service_categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, HAS_SERVICES, HAS_SERVICES))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Service category {} not found",
                id
            )));
        }

        tracing::info!("Deleted service category {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::catalog::dtos::CreateServiceDto;
    use crate::features::catalog::services::OfferingService;

    fn new_category(name: &str, slug: &str) -> CreateServiceCategoryDto {
        CreateServiceCategoryDto {
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            icon: None,
            color: None,
            meta_title: None,
            meta_description: None,
            is_active: None,
            sort_order: None,
        }
    }

    fn new_service(category_id: i64, name: &str, slug: &str) -> CreateServiceDto {
        CreateServiceDto {
            category_id,
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            short_description: None,
            content: None,
            icon: None,
            meta_title: None,
            meta_description: None,
            is_active: None,
            sort_order: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a MySQL server (DATABASE_URL)"]
    async fn created_category_reads_back_by_slug(pool: MySqlPool) {
        let service = CategoryService::new(pool);

        let mut dto = new_category("Website Development", "website-development");
        dto.color = Some("#0ea5e9".into());
        let created = service.create(dto).await.unwrap();

        let fetched = service.get_by_slug("website-development").await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, "Website Development");
        assert_eq!(fetched.color.as_deref(), Some("#0ea5e9"));
        assert!(fetched.is_active);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a MySQL server (DATABASE_URL)"]
    async fn duplicate_category_slug_is_a_conflict(pool: MySqlPool) {
        let service = CategoryService::new(pool);

        service
            .create(new_category("Hosting", "hosting"))
            .await
            .unwrap();
        let err = service
            .create(new_category("Hosting again", "hosting"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a MySQL server (DATABASE_URL)"]
    async fn category_with_services_cannot_be_deleted(pool: MySqlPool) {
        let categories = CategoryService::new(pool.clone());
        let services = OfferingService::new(pool);

        let category = categories
            .create(new_category("Digital Marketing", "digital-marketing"))
            .await
            .unwrap();
        let seo = services
            .create(new_service(category.id, "SEO", "seo"))
            .await
            .unwrap();

        let err = categories.delete(category.id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        services.delete(seo.id).await.unwrap();
        categories.delete(category.id).await.unwrap();
        let err = categories.get_by_id(category.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a MySQL server (DATABASE_URL)"]
    async fn service_needs_an_existing_category(pool: MySqlPool) {
        let services = OfferingService::new(pool);

        let err = services
            .create(new_service(9_999, "Orphan", "orphan"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a MySQL server (DATABASE_URL)"]
    async fn repeated_identical_update_gives_same_state(pool: MySqlPool) {
        let service = CategoryService::new(pool);
        let created = service
            .create(new_category("Cloud", "cloud"))
            .await
            .unwrap();

        let update = UpdateServiceCategoryDto {
            description: Some("Managed cloud infrastructure".into()),
            sort_order: Some(3),
            ..Default::default()
        };
        let first = service.update(created.id, update.clone()).await.unwrap();
        let second = service.update(created.id, update).await.unwrap();

        assert_eq!(first.description, second.description);
        assert_eq!(first.sort_order, 3);
        assert_eq!(second.sort_order, 3);
        assert_eq!(first.slug, second.slug);
    }
}
