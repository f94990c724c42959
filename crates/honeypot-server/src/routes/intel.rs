//! Diagnostic extraction endpoint.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use honeypot_intel::{categories_present, compute_cumulative_intelligence, extract};
use honeypot_protocol::ErrorBody;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::require_api_key;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/intel/extract", post(extract_intel))
}

#[derive(Deserialize)]
struct ExtractRequest {
    text: String,
    #[serde(default)]
    history: Vec<String>,
}

async fn extract_intel(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Err(rejection) = require_api_key(&headers, &state.config.api_key) {
        return rejection;
    }

    let body: ExtractRequest = match serde_json::from_slice(&body) {
        Ok(b) => b,
        Err(e) => {
            debug!(error = %e, "Rejected extract request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::new(format!("Invalid request body: {e}"))),
            )
                .into_response();
        }
    };

    let intel = if body.history.is_empty() {
        extract(&body.text)
    } else {
        compute_cumulative_intelligence(&body.text, &body.history)
    };

    Json(json!({
        "status": "success",
        "extractedIntelligence": intel,
        "categories": categories_present(&body.text),
        "gaps": intel.gaps(),
    }))
    .into_response()
}
