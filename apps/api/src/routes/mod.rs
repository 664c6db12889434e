pub mod health;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::simulation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/chat", post(handlers::handle_chat))
        .route("/api/evaluate", post(handlers::handle_evaluate))
        .route("/api/summarize", post(handlers::handle_summarize))
        .route(
            "/api/initial-guidance",
            post(handlers::handle_initial_guidance),
        )
        .with_state(state)
}

/// CORS policy for the single front-end origin.
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("ALLOWED_ORIGIN '{allowed_origin}' is not a valid header value"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}
