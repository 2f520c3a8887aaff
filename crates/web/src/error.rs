use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use funlist_scoring::{
    dto::score::ValidationErrorResponse, error::ScoringError, validation::ValidationFailure,
};
use serde_json::json;
use std::fmt;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Scoring(ScoringError),
    Validation(ValidationFailure),
    Unauthorized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scoring(e) => write!(f, "Scoring error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status_code, message) = match self {
            Self::Validation(failure) => {
                tracing::debug!("Rejected input: {}", failure);
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorResponse::from(failure)),
                )
                    .into_response();
            }
            Self::Scoring(ScoringError::NotFound) => (StatusCode::NOT_FOUND, "Score not found"),
            Self::Scoring(e @ (ScoringError::Engine(_) | ScoringError::InvalidEngineOutput(_))) => {
                tracing::error!("Score computation failed: {}", e);
                (StatusCode::BAD_GATEWAY, "Score computation failed")
            }
            Self::Scoring(e) => {
                tracing::error!("Scoring error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred",
                )
            }
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
        };

        (
            status_code,
            Json(json!({
                "success": false,
                "error": message
            })),
        )
            .into_response()
    }
}

impl From<ScoringError> for WebError {
    fn from(error: ScoringError) -> Self {
        Self::Scoring(error)
    }
}

impl From<ValidationFailure> for WebError {
    fn from(error: ValidationFailure) -> Self {
        Self::Validation(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn test_validation_maps_to_bad_request() {
        let response =
            WebError::from(ValidationFailure::single("entityType", "Required")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let payload = body(response).await;
        assert_eq!(payload["error"], "Validation failed");
        assert_eq!(payload["details"][0]["path"], "entityType");
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let response = WebError::from(ScoringError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body(response).await,
            json!({"success": false, "error": "Score not found"})
        );
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let response =
            WebError::from(ScoringError::CorruptRecord("bad brand".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body(response).await["error"], "An internal error occurred");
    }

    #[tokio::test]
    async fn test_engine_failure_maps_to_bad_gateway() {
        let response = WebError::from(ScoringError::Engine("timeout".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
