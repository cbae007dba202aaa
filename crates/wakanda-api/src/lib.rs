//! Wakanda API - HTTP front door for the answer chain
//!
//! Provides the character question endpoints plus health, metrics and
//! OpenAPI documentation routes.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use crate::error::AppError;
use crate::handlers::{ask, health};
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

/// OpenAPI document for the public routes
#[derive(OpenApi)]
#[openapi(
    paths(ask::ask_handler, ask::ask_query_handler, health::health_check),
    components(schemas(ask::AskRequest, error::ApiError, health::HealthResponse)),
    tags(
        (name = "wakanda", description = "Character question answering"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Build the application router with shared state
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", routes::api_routes())
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Permissive when no origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found() -> AppError {
    AppError::NotFound
}
