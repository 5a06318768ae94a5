use sqlx::types::Json;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::templates::dtos::{
    CreateTemplateDto, TemplateQuery, TemplateResponseDto, UpdateTemplateDto,
};
use crate::features::templates::models::{ContentTemplate, TEMPLATE_COLUMNS};
use crate::shared::validation::blank_to_none;

pub struct TemplateService {
    pool: MySqlPool,
}

impl TemplateService {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Active templates, newest first
    pub async fn list(&self, query: &TemplateQuery) -> Result<Vec<TemplateResponseDto>> {
        let mut builder = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM content_templates WHERE is_active = TRUE",
            TEMPLATE_COLUMNS
        ));
        if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
            builder.push(" AND category = ").push_bind(category.to_string());
        }
        builder.push(" ORDER BY created_at DESC, id DESC");

        let templates = builder
            .build_query_as::<ContentTemplate>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list templates: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(templates.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<TemplateResponseDto> {
        let sql = format!("SELECT {} FROM content_templates WHERE id = ?", TEMPLATE_COLUMNS);
        sqlx::query_as::<_, ContentTemplate>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get template {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Template {} not found", id)))
    }

    pub async fn create(&self, dto: CreateTemplateDto) -> Result<TemplateResponseDto> {
        let result = sqlx::query(
            r#"
            INSERT INTO content_templates (name, description, content, category, thumbnail, is_active)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&dto.name)
        .bind(blank_to_none(dto.description))
        .bind(Json(dto.content))
        .bind(blank_to_none(dto.category))
        .bind(blank_to_none(dto.thumbnail))
        .bind(dto.is_active.unwrap_or(true))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create template: {:?}", e);
            AppError::Database(e)
        })?;

        let id = result.last_insert_id() as i64;
        tracing::info!("Template {} ({}) created", id, dto.name);
        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i64, dto: UpdateTemplateDto) -> Result<TemplateResponseDto> {
        sqlx::query(
            r#"
            UPDATE content_templates
            SET name = COALESCE(?, name),
                description = COALESCE(?, description),
                content = COALESCE(?, content),
                category = COALESCE(?, category),
                thumbnail = COALESCE(?, thumbnail),
                is_active = COALESCE(?, is_active),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(dto.name)
        .bind(dto.description)
        .bind(dto.content.map(Json))
        .bind(dto.category)
        .bind(dto.thumbnail)
        .bind(dto.is_active)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update template {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        tracing::info!("Template {} updated", id);
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM content_templates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Template {} not found", id)));
        }

        tracing::info!("Template {} deleted", id);
        Ok(())
    }
}
