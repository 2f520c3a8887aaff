use funlist_scoring::{
    dto::{common::PaginationMeta, score::ComputeScoreRequest, score::GetLatestScoreRequest},
    error::Result,
    models::ScoreRecord,
    services::{self as scoring, ComputeOutcome},
};
use uuid::Uuid;

use crate::state::AppState;

/// Latest scores for a slot or entity type, with first-page pagination
pub async fn latest_scores(
    state: &AppState,
    query: &GetLatestScoreRequest,
) -> Result<(Vec<ScoreRecord>, PaginationMeta)> {
    let (records, total) = state.store.latest(query).await?;
    Ok((records, PaginationMeta::first_page(query.limit, total)))
}

/// Compute or reuse the score for a slot
pub async fn compute_score(
    state: &AppState,
    request: &ComputeScoreRequest,
) -> Result<ComputeOutcome> {
    scoring::compute_score(state.store.as_ref(), state.engine.as_ref(), request).await
}

/// Store a finished score delivered by a scoring worker
pub async fn record_score(state: &AppState, record: ScoreRecord) -> Result<ScoreRecord> {
    scoring::record_score(state.store.as_ref(), record).await
}

/// Get one score by id
pub async fn get_score(state: &AppState, id: Uuid) -> Result<ScoreRecord> {
    state.store.find(id).await
}
