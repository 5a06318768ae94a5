use sqlx::MySqlPool;

use crate::core::error::{AppError, Result};
use crate::features::catalog::dtos::{
    CreateFeatureDto, FeatureResponseDto, ListFeaturesQuery, UpdateFeatureDto,
};
use crate::features::catalog::models::{Feature, FEATURE_COLUMNS};
use crate::shared::validation::blank_to_none;

const SLUG_TAKEN: &str = "A feature with this slug already exists for the service";
const UNKNOWN_SERVICE: &str = "Service does not exist";

pub struct FeatureService {
    pool: MySqlPool,
}

impl FeatureService {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn list_active(&self, query: &ListFeaturesQuery) -> Result<Vec<FeatureResponseDto>> {
        let features = match query.service_id {
            Some(service_id) => {
                let sql = format!(
                    "SELECT {} FROM features f WHERE f.is_active = TRUE AND f.service_id = ? \
                     ORDER BY f.sort_order, f.name",
                    FEATURE_COLUMNS
                );
                sqlx::query_as::<_, Feature>(&sql)
                    .bind(service_id)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM features f WHERE f.is_active = TRUE ORDER BY f.sort_order, f.name",
                    FEATURE_COLUMNS
                );
                sqlx::query_as::<_, Feature>(&sql).fetch_all(&self.pool).await
            }
        }
        .map_err(|e| {
            tracing::error!("Failed to list features: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(features.into_iter().map(Into::into).collect())
    }

    pub async fn list_all(&self) -> Result<Vec<FeatureResponseDto>> {
        let sql = format!(
            "SELECT {} FROM features f ORDER BY f.service_id, f.sort_order, f.name",
            FEATURE_COLUMNS
        );
        let features = sqlx::query_as::<_, Feature>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list features: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(features.into_iter().map(Into::into).collect())
    }

    /// Resolve `/features/{categorySlug}/{serviceSlug}/{featureSlug}`; all three rows must be active
    pub async fn get_by_slugs(
        &self,
        category_slug: &str,
        service_slug: &str,
        feature_slug: &str,
    ) -> Result<FeatureResponseDto> {
        let sql = format!(
            "SELECT {} FROM features f \
             JOIN services s ON s.id = f.service_id \
             JOIN service_categories c ON c.id = s.category_id \
             WHERE c.slug = ? AND s.slug = ? AND f.slug = ? \
               AND f.is_active = TRUE AND s.is_active = TRUE AND c.is_active = TRUE",
            FEATURE_COLUMNS
        );
        sqlx::query_as::<_, Feature>(&sql)
            .bind(category_slug)
            .bind(service_slug)
            .bind(feature_slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get feature by slug: {:?}", e);
                AppError::Database(e)
            })?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Feature not found".to_string()))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<FeatureResponseDto> {
        let sql = format!("SELECT {} FROM features f WHERE f.id = ?", FEATURE_COLUMNS);
        sqlx::query_as::<_, Feature>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get feature {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Feature {} not found", id)))
    }

    async fn ensure_service_exists(&self, service_id: i64) -> Result<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services WHERE id = ?")
            .bind(service_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if count > 0 {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!(
                "Service {} does not exist",
                service_id
            )))
        }
    }

    pub async fn create(&self, dto: CreateFeatureDto) -> Result<FeatureResponseDto> {
        self.ensure_service_exists(dto.service_id).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO features
                (service_id, name, slug, description, content, technical_details, benefits,
                 meta_title, meta_description, is_active, sort_order)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(dto.service_id)
        .bind(&dto.name)
        .bind(&dto.slug)
        .bind(blank_to_none(dto.description))
        .bind(blank_to_none(dto.content))
        .bind(blank_to_none(dto.technical_details))
        .bind(blank_to_none(dto.benefits))
        .bind(blank_to_none(dto.meta_title))
        .bind(blank_to_none(dto.meta_description))
        .bind(dto.is_active.unwrap_or(true))
        .bind(dto.sort_order.unwrap_or(0))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, SLUG_TAKEN, UNKNOWN_SERVICE))?;

        let id = result.last_insert_id() as i64;
        tracing::info!("Created feature {} ({}) for service {}", id, dto.slug, dto.service_id);
        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i64, dto: UpdateFeatureDto) -> Result<FeatureResponseDto> {
        if let Some(service_id) = dto.service_id {
            self.ensure_service_exists(service_id).await?;
        }

        sqlx::query(
            r#"
            UPDATE features
            SET service_id = COALESCE(?, service_id),
                name = COALESCE(?, name),
                slug = COALESCE(?, slug),
                description = COALESCE(?, description),
                content = COALESCE(?, content),
                technical_details = COALESCE(?, technical_details),
                benefits = COALESCE(?, benefits),
                meta_title = COALESCE(?, meta_title),
                meta_description = COALESCE(?, meta_description),
                is_active = COALESCE(?, is_active),
                sort_order = COALESCE(?, sort_order),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(dto.service_id)
        .bind(dto.name)
        .bind(dto.slug)
        .bind(dto.description)
        .bind(dto.content)
        .bind(dto.technical_details)
        .bind(dto.benefits)
        .bind(dto.meta_title)
        .bind(dto.meta_description)
        .bind(dto.is_active)
        .bind(dto.sort_order)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, SLUG_TAKEN, UNKNOWN_SERVICE))?;

        tracing::info!("Updated feature {}", id);
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM features WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Feature {} not found", id)));
        }

        tracing::info!("Deleted feature {}", id);
        Ok(())
    }
}
