//! HTTP route handlers.

pub mod health;
pub mod honeypot;
pub mod intel;

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use honeypot_protocol::ErrorBody;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(honeypot::routes())
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(honeypot::routes())
        .merge(intel::routes())
}

/// Reject the request unless `x-api-key` matches the configured key.
pub(crate) fn require_api_key(headers: &HeaderMap, expected: &str) -> Result<(), Response> {
    let provided = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    match provided {
        Some(key) if key == expected => Ok(()),
        Some(_) => {
            warn!("Rejected request with invalid API key");
            Err(unauthorized("Invalid API key"))
        }
        None => Err(unauthorized("Missing x-api-key header")),
    }
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(ErrorBody::new(message))).into_response()
}
