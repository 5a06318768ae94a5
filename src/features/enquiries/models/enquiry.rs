use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Sales pipeline stage of a contact enquiry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Closed,
}

impl EnquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnquiryStatus::New => "new",
            EnquiryStatus::Contacted => "contacted",
            EnquiryStatus::Qualified => "qualified",
            EnquiryStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnquiryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(EnquiryStatus::New),
            "contacted" => Ok(EnquiryStatus::Contacted),
            "qualified" => Ok(EnquiryStatus::Qualified),
            "closed" => Ok(EnquiryStatus::Closed),
            other => Err(format!("unknown enquiry status '{}'", other)),
        }
    }
}

impl TryFrom<String> for EnquiryStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Enquiry {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service_interest: Option<String>,
    pub budget_range: Option<String>,
    pub message: String,
    #[sqlx(try_from = "String")]
    pub status: EnquiryStatus,
    pub source: String,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub(crate) const ENQUIRY_COLUMNS: &str = "id, name, email, phone, company, service_interest, \
     budget_range, message, status, source, responded_at, created_at, updated_at";
