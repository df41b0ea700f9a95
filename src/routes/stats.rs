use axum::{extract::State, Json};

use crate::{error::AppResult, models::CatalogStats, routes::AppState, services::stats};

/// Handler for catalog statistics endpoint
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<CatalogStats>> {
    let store = state.catalog.store()?;
    Ok(Json(stats::summarize(store)))
}
