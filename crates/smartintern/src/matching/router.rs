use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::repository::PostingRepository;
use super::service::{RecommendationError, RecommendationRequest, RecommendationService};

/// Router builder exposing the recommendation and catalog endpoints.
pub fn recommendation_router<R>(service: Arc<RecommendationService<R>>) -> Router
where
    R: PostingRepository + 'static,
{
    Router::new()
        .route("/api/v1/recommendations", post(recommend_handler::<R>))
        .route("/api/v1/postings", get(postings_handler::<R>))
        .with_state(service)
}

pub(crate) async fn recommend_handler<R>(
    State(service): State<Arc<RecommendationService<R>>>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response
where
    R: PostingRepository + 'static,
{
    match service.recommend(request) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn postings_handler<R>(
    State(service): State<Arc<RecommendationService<R>>>,
) -> Response
where
    R: PostingRepository + 'static,
{
    match service.listing() {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: RecommendationError) -> Response {
    match error {
        RecommendationError::Configuration(error) => {
            let payload = json!({
                "error": error.to_string(),
                "criterion": error.criterion(),
                "constraint": error.constraint(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        RecommendationError::Repository(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}
