//! Liveness and service banner.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "honeypot",
    }))
}

async fn banner() -> Json<serde_json::Value> {
    Json(json!({
        "service": "honeypot",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "honeypot": "POST /honeypot",
            "extract": "POST /api/intel/extract",
            "health": "GET /health",
        },
    }))
}
