use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::PaginationMeta;
use crate::models::{Brand, EntityType, ScoreRecord, ScoreSlot, ScoreSystem};
use crate::validation::{ValidationFailure, ValidationIssue};

pub const LIMIT_MIN: u32 = 1;
pub const LIMIT_MAX: u32 = 100;
pub const DEFAULT_LIMIT: u32 = 10;

/// Request payload for computing the score of one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComputeScoreRequest {
    pub brand: Brand,

    pub system: ScoreSystem,

    pub entity_type: EntityType,

    #[validate(range(min = 1, message = "Number must be greater than or equal to 1"))]
    #[schema(minimum = 1)]
    pub entity_id: i64,

    /// Bypass any previous result and recompute unconditionally
    #[serde(default)]
    #[schema(default = false)]
    pub force_recompute: bool,
}

impl ComputeScoreRequest {
    pub fn slot(&self) -> ScoreSlot {
        ScoreSlot {
            brand: self.brand,
            system: self.system,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
        }
    }
}

/// Query for the latest scores of one entity, or of every entity of a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GetLatestScoreRequest {
    #[param(inline)]
    pub brand: Brand,

    #[param(inline)]
    pub system: ScoreSystem,

    #[param(inline)]
    pub entity_type: EntityType,

    /// Restrict the result to one entity's history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Number must be greater than or equal to 1"))]
    #[param(minimum = 1)]
    pub entity_id: Option<i64>,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "Number must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, default = 10)]
    pub limit: u32,
}

pub(crate) fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Envelope for a single score
///
/// Either `data` or `error` is present, never both.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoreResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<ScoreRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ScoreResponse {
    pub fn success(record: ScoreRecord) -> Self {
        Self {
            success: true,
            data: Some(record),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&ScoreRecord> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Envelope for an ordered list of scores
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoresListResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Vec<ScoreRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pagination: Option<PaginationMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ScoresListResponse {
    pub fn success(records: Vec<ScoreRecord>, pagination: PaginationMeta) -> Self {
        Self {
            success: true,
            data: Some(records),
            pagination: Some(pagination),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            pagination: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> &[ScoreRecord] {
        self.data.as_deref().unwrap_or_default()
    }

    pub fn pagination(&self) -> Option<&PaginationMeta> {
        self.pagination.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Body returned with HTTP 400 when input fails validation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Validation failed")]
    pub error: String,
    pub details: Vec<ValidationIssue>,
}

impl From<ValidationFailure> for ValidationErrorResponse {
    fn from(failure: ValidationFailure) -> Self {
        Self {
            success: false,
            error: "Validation failed".to_string(),
            details: failure.into_issues(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::{ScoreDimensions, ScoreStatus};

    fn record() -> ScoreRecord {
        ScoreRecord {
            id: None,
            brand: Brand::Funlist,
            system: ScoreSystem::Funalytics,
            entity_type: EntityType::Event,
            entity_id: 42,
            overall_score: 7.5,
            dimensions: ScoreDimensions::default(),
            reasoning: None,
            status: ScoreStatus::Completed,
            computed_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_success_envelope_omits_error() {
        let body = serde_json::to_value(ScoreResponse::success(record())).unwrap();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["entityId"], json!(42));
        assert!(body.get("error").is_none());
    }

    #[test]
    fn test_failure_envelope_omits_data() {
        let body = serde_json::to_value(ScoresListResponse::failure("Score engine unavailable"))
            .unwrap();
        assert_eq!(
            body,
            json!({"success": false, "error": "Score engine unavailable"})
        );
    }

    #[test]
    fn test_list_envelope_carries_pagination() {
        let response = ScoresListResponse::success(vec![record()], PaginationMeta::first_page(10, 1));
        assert_eq!(response.data().len(), 1);

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(
            body["pagination"],
            json!({"page": 1, "limit": 10, "total": 1, "pages": 1})
        );
    }

    #[test]
    fn test_validation_error_body_shape() {
        let failure = ValidationFailure::single("entityType", "Required");
        let body = serde_json::to_value(ValidationErrorResponse::from(failure)).unwrap();
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": "Validation failed",
                "details": [{"path": "entityType", "message": "Required"}]
            })
        );
    }
}
