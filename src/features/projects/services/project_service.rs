use sqlx::types::Json;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::projects::dtos::{
    CreateProjectDto, ListProjectsQuery, ProjectResponseDto, UpdateProjectDto,
};
use crate::features::projects::models::{Project, PROJECT_COLUMNS};
use crate::shared::validation::blank_to_none;

const SLUG_TAKEN: &str = "A project with this slug already exists";

pub struct ProjectService {
    pool: MySqlPool,
}

impl ProjectService {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn list_active(&self, query: &ListProjectsQuery) -> Result<Vec<ProjectResponseDto>> {
        let mut builder = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM projects WHERE is_active = TRUE",
            PROJECT_COLUMNS
        ));
        if let Some(featured) = query.featured {
            builder.push(" AND is_featured = ").push_bind(featured);
        }
        builder.push(" ORDER BY sort_order ASC, created_at DESC");

        let projects = builder
            .build_query_as::<Project>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list projects: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(projects.into_iter().map(Into::into).collect())
    }

    pub async fn list_all(&self) -> Result<Vec<ProjectResponseDto>> {
        let sql = format!(
            "SELECT {} FROM projects ORDER BY sort_order ASC, created_at DESC",
            PROJECT_COLUMNS
        );
        let projects = sqlx::query_as::<_, Project>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list projects: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(projects.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<ProjectResponseDto> {
        let sql = format!(
            "SELECT {} FROM projects WHERE slug = ? AND is_active = TRUE",
            PROJECT_COLUMNS
        );
        sqlx::query_as::<_, Project>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get project {}: {:?}", slug, e);
                AppError::Database(e)
            })?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ProjectResponseDto> {
        let sql = format!("SELECT {} FROM projects WHERE id = ?", PROJECT_COLUMNS);
        sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    pub async fn create(&self, dto: CreateProjectDto) -> Result<ProjectResponseDto> {
        let result = sqlx::query(
            r#"
            INSERT INTO projects
                (title, slug, description, short_description, content, image_url, demo_url,
                 technologies, category, client_name, completion_date, meta_title,
                 meta_description, is_active, is_featured, sort_order)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.slug)
        .bind(blank_to_none(dto.description))
        .bind(blank_to_none(dto.short_description))
        .bind(blank_to_none(dto.content))
        .bind(blank_to_none(dto.image_url))
        .bind(blank_to_none(dto.demo_url))
        .bind(Json(dto.technologies))
        .bind(blank_to_none(dto.category))
        .bind(blank_to_none(dto.client_name))
        .bind(dto.completion_date)
        .bind(blank_to_none(dto.meta_title))
        .bind(blank_to_none(dto.meta_description))
        .bind(dto.is_active.unwrap_or(true))
        .bind(dto.is_featured.unwrap_or(false))
        .bind(dto.sort_order.unwrap_or(0))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, SLUG_TAKEN, SLUG_TAKEN))?;

        let id = result.last_insert_id() as i64;
        tracing::info!("Project {} ({}) created", id, dto.slug);
        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i64, dto: UpdateProjectDto) -> Result<ProjectResponseDto> {
        sqlx::query(
            r#"
            UPDATE projects
            SET title = COALESCE(?, title),
                slug = COALESCE(?, slug),
                description = COALESCE(?, description),
                short_description = COALESCE(?, short_description),
                content = COALESCE(?, content),
                image_url = COALESCE(?, image_url),
                demo_url = COALESCE(?, demo_url),
                technologies = COALESCE(?, technologies),
                category = COALESCE(?, category),
                client_name = COALESCE(?, client_name),
                completion_date = COALESCE(?, completion_date),
                meta_title = COALESCE(?, meta_title),
                meta_description = COALESCE(?, meta_description),
                is_active = COALESCE(?, is_active),
                is_featured = COALESCE(?, is_featured),
                sort_order = COALESCE(?, sort_order),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(dto.title)
        .bind(dto.slug)
        .bind(dto.description)
        .bind(dto.short_description)
        .bind(dto.content)
        .bind(dto.image_url)
        .bind(dto.demo_url)
        .bind(dto.technologies.map(Json))
        .bind(dto.category)
        .bind(dto.client_name)
        .bind(dto.completion_date)
        .bind(dto.meta_title)
        .bind(dto.meta_description)
        .bind(dto.is_active)
        .bind(dto.is_featured)
        .bind(dto.sort_order)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, SLUG_TAKEN, SLUG_TAKEN))?;

        tracing::info!("Project {} updated", id);
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Project {} not found", id)));
        }

        tracing::info!("Project {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_project(title: &str, slug: &str) -> CreateProjectDto {
        CreateProjectDto {
            title: title.to_string(),
            slug: slug.to_string(),
            description: None,
            short_description: None,
            content: None,
            image_url: None,
            demo_url: None,
            technologies: Vec::new(),
            category: None,
            client_name: None,
            completion_date: None,
            meta_title: None,
            meta_description: None,
            is_active: None,
            is_featured: None,
            sort_order: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a MySQL server (DATABASE_URL)"]
    async fn created_project_reads_back_by_slug(pool: MySqlPool) {
        let service = ProjectService::new(pool);

        let mut dto = new_project("Hospital Management System", "hospital-management");
        dto.technologies = vec!["Rust".into(), "MySQL".into()];
        dto.is_featured = Some(true);
        dto.demo_url = Some("https://demo.ienet.example/hms".into());
        let created = service.create(dto.clone()).await.unwrap();

        let fetched = service.get_by_slug("hospital-management").await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.title, dto.title);
        assert_eq!(fetched.technologies, dto.technologies);
        assert_eq!(fetched.demo_url, dto.demo_url);
        assert!(fetched.is_featured);
        assert!(fetched.is_active);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a MySQL server (DATABASE_URL)"]
    async fn duplicate_project_slug_is_a_conflict(pool: MySqlPool) {
        let service = ProjectService::new(pool);

        service
            .create(new_project("Optical Store ERP", "optical-erp"))
            .await
            .unwrap();
        let err = service
            .create(new_project("Optical Store ERP v2", "optical-erp"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires a MySQL server (DATABASE_URL)"]
    async fn repeated_identical_update_gives_same_state(pool: MySqlPool) {
        let service = ProjectService::new(pool);
        let created = service
            .create(new_project("School Portal", "school-portal"))
            .await
            .unwrap();

        let update = UpdateProjectDto {
            client_name: Some("Greenfield Academy".into()),
            technologies: Some(vec!["Axum".into()]),
            ..Default::default()
        };
        let first = service.update(created.id, update.clone()).await.unwrap();
        let second = service.update(created.id, update).await.unwrap();

        let state = |p: &ProjectResponseDto| {
            let mut value = serde_json::to_value(p).unwrap();
            value.as_object_mut().unwrap().remove("updatedAt");
            value
        };
        assert_eq!(state(&first), state(&second));
        assert_eq!(first.technologies, vec!["Axum".to_string()]);
    }
}
