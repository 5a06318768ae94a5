use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::catalog::dtos::{
    CreateServiceDto, ListServicesQuery, ServiceResponseDto, UpdateServiceDto,
};
use crate::features::catalog::models::{Service, SERVICE_COLUMNS};
use crate::shared::validation::blank_to_none;

const SLUG_TAKEN: &str = "A service with this slug already exists in the category";
const UNKNOWN_CATEGORY: &str = "Service category does not exist";
const HAS_FEATURES: &str = "Service still has features; delete or move them first";

/// Service for the middle tier of the catalog (`services` table)
pub struct OfferingService {
    pool: MySqlPool,
}

impl OfferingService {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// List active services, optionally narrowed to one category by id or slug
    pub async fn list_active(&self, query: &ListServicesQuery) -> Result<Vec<ServiceResponseDto>> {
        let mut builder = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM services s \
             JOIN service_categories c ON c.id = s.category_id \
             WHERE s.is_active = TRUE",
            SERVICE_COLUMNS
        ));

        if let Some(category_id) = query.category_id {
            builder.push(" AND s.category_id = ").push_bind(category_id);
        }
        if let Some(category_slug) = &query.category_slug {
            builder.push(" AND c.slug = ").push_bind(category_slug.clone());
        }
        builder.push(" ORDER BY s.sort_order, s.name");

        let services = builder
            .build_query_as::<Service>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list services: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(services.into_iter().map(Into::into).collect())
    }

    /// Every service, including inactive ones (admin screens)
    pub async fn list_all(&self) -> Result<Vec<ServiceResponseDto>> {
        let query = format!(
            "SELECT {} FROM services s ORDER BY s.category_id, s.sort_order, s.name",
            SERVICE_COLUMNS
        );
        let services = sqlx::query_as::<_, Service>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list services: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(services.into_iter().map(Into::into).collect())
    }

    /// Resolve `/services/{categorySlug}/{serviceSlug}`; both rows must be active
    pub async fn get_by_slugs(
        &self,
        category_slug: &str,
        service_slug: &str,
    ) -> Result<ServiceResponseDto> {
        let query = format!(
            "SELECT {} FROM services s \
             JOIN service_categories c ON c.id = s.category_id \
             WHERE c.slug = ? AND s.slug = ? AND s.is_active = TRUE AND c.is_active = TRUE",
            SERVICE_COLUMNS
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(category_slug)
            .bind(service_slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get service by slug: {:?}", e);
                AppError::Database(e)
            })?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Service not found".to_string()))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ServiceResponseDto> {
        let query = format!("SELECT {} FROM services s WHERE s.id = ?", SERVICE_COLUMNS);
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get service {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))
    }

    async fn ensure_category_exists(&self, category_id: i64) -> Result<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM service_categories WHERE id = ?")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if count > 0 {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!(
                "Service category {} does not exist",
                category_id
            )))
        }
    }

    pub async fn create(&self, dto: CreateServiceDto) -> Result<ServiceResponseDto> {
        self.ensure_category_exists(dto.category_id).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO services
                (category_id, name, slug, description, short_description, content, icon,
                 meta_title, meta_description, is_active, sort_order)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(dto.category_id)
        .bind(&dto.name)
        .bind(&dto.slug)
        .bind(blank_to_none(dto.description))
        .bind(blank_to_none(dto.short_description))
        .bind(blank_to_none(dto.content))
        .bind(blank_to_none(dto.icon))
        .bind(blank_to_none(dto.meta_title))
        .bind(blank_to_none(dto.meta_description))
        .bind(dto.is_active.unwrap_or(true))
        .bind(dto.sort_order.unwrap_or(0))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, SLUG_TAKEN, UNKNOWN_CATEGORY))?;

        let id = result.last_insert_id() as i64;
        tracing::info!(
            "Created service {} ({}) in category {}",
            id,
            dto.slug,
            dto.category_id
        );
        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i64, dto: UpdateServiceDto) -> Result<ServiceResponseDto> {
        if let Some(category_id) = dto.category_id {
            self.ensure_category_exists(category_id).await?;
        }

        sqlx::query(
            r#"
            UPDATE services
            SET category_id = COALESCE(?, category_id),
                name = COALESCE(?, name),
                slug = COALESCE(?, slug),
                description = COALESCE(?, description),
                short_description = COALESCE(?, short_description),
                content = COALESCE(?, content),
                icon = COALESCE(?, icon),
                meta_title = COALESCE(?, meta_title),
                meta_description = COALESCE(?, meta_description),
                is_active = COALESCE(?, is_active),
                sort_order = COALESCE(?, sort_order),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(dto.category_id)
        .bind(dto.name)
        .bind(dto.slug)
        .bind(dto.description)
        .bind(dto.short_description)
        .bind(dto.content)
        .bind(dto.icon)
        .bind(dto.meta_title)
        .bind(dto.meta_description)
        .bind(dto.is_active)
        .bind(dto.sort_order)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, SLUG_TAKEN, UNKNOWN_CATEGORY))?;

        tracing::info!("Updated service {}", id);
        self.get_by_id(id).await
    }

    /// Delete a service. Refused while features still reference it.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let dependents: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM features WHERE service_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if dependents > 0 {
            return Err(AppError::Conflict(HAS_FEATURES.to_string()));
        }

        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, HAS_FEATURES, HAS_FEATURES))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Service {} not found", id)));
        }

        tracing::info!("Deleted service {}", id);
        Ok(())
    }
}
