use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BulkPageAction {
    Publish,
    Unpublish,
    Archive,
    Delete,
}

impl BulkPageAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BulkPageAction::Publish => "publish",
            BulkPageAction::Unpublish => "unpublish",
            BulkPageAction::Archive => "archive",
            BulkPageAction::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkPageActionDto {
    pub action: BulkPageAction,

    #[validate(length(min = 1, max = 100, message = "Select between 1 and 100 pages"))]
    pub page_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkPageResultDto {
    pub action: BulkPageAction,
    /// Pages the action was applied to
    pub affected: Vec<i64>,
    /// Requested ids that do not exist
    pub missing: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_bulk_request() {
        let dto: BulkPageActionDto = serde_json::from_value(json!({
            "action": "archive",
            "pageIds": [3, 5, 8]
        }))
        .unwrap();
        assert_eq!(dto.action, BulkPageAction::Archive);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn empty_selection_rejected() {
        let dto = BulkPageActionDto {
            action: BulkPageAction::Publish,
            page_ids: vec![],
        };
        assert!(dto.validate().is_err());
    }
}
