use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{RecommendationOutcome, RecommendationRequest},
    routes::AppState,
    services::recommendations,
};

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationOutcome>> {
    let Json(request) = payload.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

    let movie_name = request
        .movie_name
        .ok_or_else(|| AppError::InvalidInput("Movie name is required".to_string()))?;
    recommendations::validate_movie_name(&movie_name)?;
    let count = recommendations::validate_count(
        request
            .n_recommendations
            .unwrap_or(state.default_recommendations),
    )?;

    tracing::info!(
        request_id = %request_id,
        movie_name = %movie_name,
        count,
        "Processing recommendation request"
    );

    let store = state.catalog.store()?;
    let outcome = recommendations::recommend(store, &movie_name, count, &mut rand::thread_rng())
        .map_err(|e| {
            tracing::info!(request_id = %request_id, error = %e, "Recommendation request rejected");
            e
        })?;

    Ok(Json(outcome))
}
