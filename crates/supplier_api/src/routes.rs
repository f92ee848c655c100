//! Router assembly.

use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

/// Builds the application router with fully open CORS.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/test", get(handlers::diagnostics))
        .route("/seed", post(handlers::seed))
        .route("/products", get(handlers::list_products))
        .route("/products/:slug", get(handlers::get_product))
        .route("/solutions", get(handlers::list_solutions))
        .route("/case-studies", get(handlers::list_case_studies))
        .route("/rfq", post(handlers::submit_rfq))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
