use axum::{
    extract::State,
    handler::HandlerWithoutStateExt,
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    error::AppError,
    middleware::{make_span_with_request_id, request_id_middleware},
    models::HealthStatus,
};

pub mod recommendations;
pub mod stats;
pub mod titles;

mod state;

pub use state::{AppState, Catalog};

/// Creates the application router with all routes
///
/// Anything outside `/api` is looked up in the static directory.
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir).not_found_service(not_found.into_service());

    Router::new()
        .nest("/api", api_routes())
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/recommend", post(recommendations::recommend))
        .route("/stats", get(stats::stats))
        .route("/movies/search", get(titles::search))
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let store = state.catalog.get();

    Json(HealthStatus {
        status: "healthy",
        model_loaded: store.is_some(),
        total_movies: store.map_or(0, |store| store.len()),
        version: env!("CARGO_PKG_VERSION"),
        loaded_at: store.map(|store| store.loaded_at()),
    })
}

async fn not_found() -> AppError {
    AppError::NotFound("Resource not found".to_string())
}
