use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::enquiries::dtos::{
    CreateEnquiryDto, EnquiryResponseDto, ListEnquiriesQuery,
};
use crate::features::enquiries::models::{Enquiry, EnquiryStatus, ENQUIRY_COLUMNS};
use crate::shared::validation::blank_to_none;

const WEBSITE_SOURCE: &str = "website";

pub struct EnquiryService {
    pool: MySqlPool,
}

impl EnquiryService {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Store a contact-form submission and return its id
    pub async fn submit(&self, dto: CreateEnquiryDto) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO enquiries
                (name, email, phone, company, service_interest, budget_range, message, status, source)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(dto.name.trim())
        .bind(dto.email.trim())
        .bind(blank_to_none(dto.phone))
        .bind(blank_to_none(dto.company))
        .bind(blank_to_none(dto.service_interest))
        .bind(blank_to_none(dto.budget_range))
        .bind(&dto.message)
        .bind(EnquiryStatus::New.as_str())
        .bind(WEBSITE_SOURCE)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to store enquiry: {:?}", e);
            AppError::Database(e)
        })?;

        let id = result.last_insert_id() as i64;
        tracing::info!("Enquiry {} received", id);
        Ok(id)
    }

    /// Newest first, optionally narrowed to one status
    pub async fn list(&self, query: &ListEnquiriesQuery) -> Result<Vec<EnquiryResponseDto>> {
        let mut builder = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM enquiries WHERE 1 = 1",
            ENQUIRY_COLUMNS
        ));
        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        builder.push(" ORDER BY created_at DESC, id DESC");

        let enquiries = builder
            .build_query_as::<Enquiry>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list enquiries: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(enquiries.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<EnquiryResponseDto> {
        let sql = format!("SELECT {} FROM enquiries WHERE id = ?", ENQUIRY_COLUMNS);
        sqlx::query_as::<_, Enquiry>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Enquiry {} not found", id)))
    }

    /// Move an enquiry through the pipeline; the first move out of `new`
    /// records `responded_at`
    pub async fn update_status(&self, id: i64, status: EnquiryStatus) -> Result<EnquiryResponseDto> {
        // responded_at is assigned first so it still sees the previous status
        sqlx::query(
            r#"
            UPDATE enquiries
            SET responded_at = CASE
                    WHEN status = 'new' AND ? <> 'new' AND responded_at IS NULL
                    THEN CURRENT_TIMESTAMP
                    ELSE responded_at
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
            tracing::error!("Failed to update enquiry {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        let enquiry = self.get_by_id(id).await?;
        tracing::info!("Enquiry {} is now {}", id, status);
        Ok(enquiry)
    }
}
