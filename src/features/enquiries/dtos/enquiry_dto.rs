use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::enquiries::models::{Enquiry, EnquiryStatus};

/// Public contact-form submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnquiryDto {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(length(max = 255))]
    pub company: Option<String>,

    #[validate(length(max = 255))]
    pub service_interest: Option<String>,

    #[validate(length(max = 100))]
    pub budget_range: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "Message is required"))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryReceiptDto {
    pub id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListEnquiriesQuery {
    pub status: Option<EnquiryStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnquiryDto {
    pub status: EnquiryStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryResponseDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service_interest: Option<String>,
    pub budget_range: Option<String>,
    pub message: String,
    pub status: EnquiryStatus,
    pub source: String,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Enquiry> for EnquiryResponseDto {
    fn from(e: Enquiry) -> Self {
        Self {
            id: e.id,
            name: e.name,
            email: e.email,
            phone: e.phone,
            company: e.company,
            service_interest: e.service_interest,
            budget_range: e.budget_range,
            message: e.message,
            status: e.status,
            source: e.source,
            responded_at: e.responded_at,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::lorem::en::Paragraph;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn submission() -> CreateEnquiryDto {
        CreateEnquiryDto {
            name: Name().fake(),
            email: SafeEmail().fake(),
            phone: None,
            company: Some("Acme Logistics".into()),
            service_interest: Some("Cloud Migration".into()),
            budget_range: Some("10k-25k".into()),
            message: Paragraph(1..3).fake(),
        }
    }

    #[test]
    fn accepts_generated_submission() {
        assert!(submission().validate().is_ok());
    }

    #[test]
    fn rejects_bad_email_and_empty_message() {
        let mut dto = submission();
        dto.email = "not-an-email".into();
        dto.message = String::new();

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("message"));
    }
}
