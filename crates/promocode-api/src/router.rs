//! Route definitions for the HTTP API.
//!
//! All routes are mounted under `/api` and receive `AppState` through
//! Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .merge(partner_routes());

    let cors = middleware::cors::cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Partner lookup and limit management
fn partner_routes() -> Router<AppState> {
    Router::new()
        .route("/partners", get(handlers::partner::list_partners))
        .route("/partners/{id}", get(handlers::partner::get_partner))
        .route(
            "/partners/{id}/limits",
            post(handlers::partner::set_partner_limit),
        )
        .route(
            "/partners/{id}/limits/cancel",
            post(handlers::partner::cancel_partner_limit),
        )
        .route(
            "/partners/{id}/limits/{limit_id}",
            get(handlers::partner::get_partner_limit),
        )
}
