//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Catalog
        .route("/schema", get(handlers::catalog::get_schema))
        .route("/templates", get(handlers::catalog::list_templates))
        // Wizard sessions
        .route("/sessions", post(handlers::session::create_session))
        .route(
            "/sessions/{id}",
            get(handlers::session::get_session).delete(handlers::session::delete_session),
        )
        .route("/sessions/{id}/next", post(handlers::session::next_step))
        .route("/sessions/{id}/back", post(handlers::session::go_back))
        .route(
            "/sessions/{id}/template",
            post(handlers::session::apply_template),
        )
        .route("/sessions/{id}/predict", post(handlers::session::predict))
        .route("/sessions/{id}/reset", post(handlers::session::reset));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
