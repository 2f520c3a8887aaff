use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{compute_score, get_latest_scores, get_score, record_score};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(record_score))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/latest", get(get_latest_scores))
        .route("/compute", post(compute_score))
        .route("/:id", get(get_score))
        .merge(protected)
}
