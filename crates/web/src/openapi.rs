use utoipa::OpenApi;

use crate::features::scores::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FunList Scoring API",
        description = "Compute and query brand-scoped scores for events, venues and experiences"
    ),
    servers(
        (url = "/api", description = "Score API base path")
    ),
    paths(
        handlers::get_latest_scores,
        handlers::compute_score,
        handlers::record_score,
        handlers::get_score,
    ),
    components(
        schemas(
            funlist_scoring::models::Brand,
            funlist_scoring::models::ScoreSystem,
            funlist_scoring::models::EntityType,
            funlist_scoring::models::ScoreStatus,
            funlist_scoring::models::ScoreDimensions,
            funlist_scoring::models::ScoreRecord,
            funlist_scoring::dto::score::ComputeScoreRequest,
            funlist_scoring::dto::score::ScoreResponse,
            funlist_scoring::dto::score::ScoresListResponse,
            funlist_scoring::dto::score::ValidationErrorResponse,
            funlist_scoring::dto::common::PaginationMeta,
            funlist_scoring::validation::ValidationIssue,
        )
    ),
    tags(
        (name = "scores", description = "Score computation and lookup"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}
