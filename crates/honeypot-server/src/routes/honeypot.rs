//! The conversational honeypot endpoint.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use honeypot_chat::reply::{FALLBACK_REPLY, NOT_SCAM_REPLY};
use honeypot_chat::{detect_scam_type, HistoryLine, ReplyContext, ScamType, ScamVerdict};
use honeypot_intel::{analyze_turn, ExtractedIntelligence};
use honeypot_protocol::{
    engagement_metrics, normalize_request, should_send_callback, CallbackPayload,
    HoneypotRequest, HoneypotResponse,
};
use tracing::{info, warn};

use super::require_api_key;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/honeypot", post(honeypot))
}

async fn honeypot(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Err(rejection) = require_api_key(&headers, &state.config.api_key) {
        return rejection;
    }

    let value: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "Malformed honeypot request body");
            return Json(HoneypotResponse::fallback(
                FALLBACK_REPLY,
                "Request body could not be parsed.",
            ))
            .into_response();
        }
    };

    let req = normalize_request(&value);
    Json(process_turn(&state, req).await).into_response()
}

/// Run one inbound scammer message through classification, extraction and reply.
pub(crate) async fn process_turn(state: &Arc<AppState>, req: HoneypotRequest) -> HoneypotResponse {
    let now = Utc::now();
    let session = state.sessions.touch(&req.session_id, now);

    let history: Vec<HistoryLine> = req
        .conversation_history
        .iter()
        .map(|m| HistoryLine::new(m.sender.clone(), m.text.clone()))
        .collect();
    let intel = analyze_turn(&req.message.text, &req.conversation_history);

    let deep = req.conversation_history.len() > state.config.deep_conversation_turns;
    let verdict = if deep || session.scam_flagged {
        ScamVerdict::established()
    } else {
        state.classifier.classify(&req.message.text, &history).await
    };
    if verdict.is_scam {
        state.sessions.flag_scam(&req.session_id);
    }

    let scam_type = if verdict.is_scam {
        detect_scam_type(&req.message.text, &history)
    } else {
        ScamType::Unknown
    };

    let reply = if verdict.is_scam {
        let ctx = ReplyContext {
            current_message: req.message.text.clone(),
            history,
            intel: intel.aggregate.clone(),
            language: req.language.clone(),
            channel: req.channel.clone(),
            turn: req.turn_number(),
        };
        state.replies.generate(&ctx).await
    } else {
        NOT_SCAM_REPLY.to_string()
    };

    let metrics = engagement_metrics(&req, Some(session.started_at), now);
    let agent_notes = agent_notes(&verdict, scam_type, &intel.aggregate);
    let fresh = intel.has_fresh_intel();

    info!(
        session_id = %req.session_id,
        turn = req.turn_number(),
        scam = verdict.is_scam,
        scam_type = %scam_type,
        fresh_intel = fresh,
        items = intel.aggregate.total_items(),
        "Processed honeypot turn"
    );

    let response = HoneypotResponse {
        status: "success".into(),
        reply,
        scam_detected: verdict.is_scam,
        scam_type: scam_type.to_string(),
        confidence: verdict.confidence,
        extracted_intelligence: intel.aggregate,
        engagement_metrics: metrics,
        agent_notes,
    };

    if should_send_callback(
        verdict.is_scam,
        fresh,
        req.turn_number(),
        metrics.total_messages_exchanged,
    ) {
        let payload = CallbackPayload {
            session_id: req.session_id.clone(),
            scam_detected: response.scam_detected,
            total_messages_exchanged: metrics.total_messages_exchanged,
            engagement_duration_seconds: metrics.engagement_duration_seconds,
            scam_type: response.scam_type.clone(),
            extracted_intelligence: response.extracted_intelligence.clone(),
            agent_notes: response.agent_notes.clone(),
        };
        let state = state.clone();
        tokio::spawn(async move {
            match state.callbacks.report(&payload).await {
                Ok(()) => state.sessions.record_callback(&payload.session_id),
                Err(e) => warn!(session_id = %payload.session_id, error = %e, "Callback failed"),
            }
        });
    }

    response
}

fn agent_notes(verdict: &ScamVerdict, scam_type: ScamType, intel: &ExtractedIntelligence) -> String {
    if !verdict.is_scam {
        return format!("No scam detected. {}", verdict.reasoning);
    }

    let mut notes = format!("Scam type: {scam_type}.");
    if !verdict.patterns.is_empty() {
        notes.push_str(&format!(" Signals: {}.", verdict.patterns.join(", ")));
    }
    let found: Vec<String> = intel
        .fields()
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(name, values)| format!("{name}={}", values.len()))
        .collect();
    if found.is_empty() {
        notes.push_str(" No intelligence extracted yet.");
    } else {
        notes.push_str(&format!(" Extracted: {}.", found.join(", ")));
    }
    let gaps = intel.gaps();
    if !gaps.is_empty() {
        notes.push_str(&format!(" Still missing: {}.", gaps.join(", ")));
    }
    notes
}
