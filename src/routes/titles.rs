use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    routes::AppState,
    services::title_search,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
    limit: Option<usize>,
}

/// Handler for title autocomplete endpoint
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> AppResult<Json<Vec<String>>> {
    let Query(params) = params.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

    let limit = params.limit.unwrap_or(state.default_search_limit);
    let titles = title_search::search_titles(state.catalog.get(), &params.q, limit);
    Ok(Json(titles))
}
