use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use funlist_scoring::{
    dto::score::{
        ComputeScoreRequest, GetLatestScoreRequest, ScoreResponse, ScoresListResponse,
        ValidationErrorResponse,
    },
    models::ScoreRecord,
    validation::ValidationFailure,
};
use uuid::Uuid;

use crate::error::WebResult;
use crate::middleware::validation::{Validated, ValidatedQuery};
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/scores/latest",
    params(GetLatestScoreRequest),
    responses(
        (status = 200, description = "Latest scores, newest first", body = ScoresListResponse),
        (status = 400, description = "Invalid query parameters", body = ValidationErrorResponse)
    ),
    tag = "scores"
)]
pub async fn get_latest_scores(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<GetLatestScoreRequest>,
) -> WebResult<Response> {
    let (records, pagination) = services::latest_scores(&state, &query).await?;

    Ok(Json(ScoresListResponse::success(records, pagination)).into_response())
}

#[utoipa::path(
    post,
    path = "/scores/compute",
    request_body = ComputeScoreRequest,
    responses(
        (status = 200, description = "An existing score for the slot was returned", body = ScoreResponse),
        (status = 201, description = "A new score was computed", body = ScoreResponse),
        (status = 400, description = "Validation error", body = ValidationErrorResponse),
        (status = 502, description = "Score computation failed", body = ScoreResponse)
    ),
    tag = "scores"
)]
pub async fn compute_score(
    State(state): State<AppState>,
    Validated(request): Validated<ComputeScoreRequest>,
) -> WebResult<Response> {
    let outcome = services::compute_score(&state, &request).await?;

    let status = if outcome.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(ScoreResponse::success(outcome.into_record()))).into_response())
}

#[utoipa::path(
    post,
    path = "/scores",
    request_body = ScoreRecord,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Score recorded", body = ScoreResponse),
        (status = 400, description = "Validation error", body = ValidationErrorResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "scores"
)]
pub async fn record_score(
    State(state): State<AppState>,
    Validated(record): Validated<ScoreRecord>,
) -> WebResult<Response> {
    let stored = services::record_score(&state, record).await?;

    Ok((StatusCode::CREATED, Json(ScoreResponse::success(stored))).into_response())
}

#[utoipa::path(
    get,
    path = "/scores/{id}",
    params(
        ("id" = Uuid, Path, description = "Score id")
    ),
    responses(
        (status = 200, description = "Score found", body = ScoreResponse),
        (status = 400, description = "Malformed id", body = ValidationErrorResponse),
        (status = 404, description = "Score not found", body = ScoreResponse)
    ),
    tag = "scores"
)]
pub async fn get_score(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<Response> {
    let id = Uuid::parse_str(&id).map_err(|_| ValidationFailure::single("id", "Invalid uuid"))?;
    let record = services::get_score(&state, id).await?;

    Ok(Json(ScoreResponse::success(record)).into_response())
}
