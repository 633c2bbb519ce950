use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Landing page
        .route("/", get(handlers::trending))
        .route("/products/trending", get(handlers::trending))
        // Accounts
        .route("/signup", post(handlers::signup))
        .route("/signin", post(handlers::signin))
        // Catalog queries
        .route("/recommendations", post(handlers::recommendations))
        .route("/search", get(handlers::search))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
