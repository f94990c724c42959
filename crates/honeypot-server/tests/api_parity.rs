//! API parity tests: validates that request normalization and response
//! shapes match what the scoring platform sends and expects.
//!
//! These tests work on the protocol types directly (no HTTP server needed)
//! to pin field names and types on the wire.

use honeypot_intel::{compute_cumulative_intelligence, ExtractedIntelligence};
use honeypot_protocol::{
    engagement_metrics, normalize_request, CallbackPayload, ErrorBody, HoneypotResponse,
};
use serde_json::json;

/// The platform's canonical request: camelCase keys, ISO timestamps, metadata block.
#[test]
fn test_platform_request_normalizes() {
    let body = json!({
        "sessionId": "wertyu-dfghj-ertyui",
        "message": {
            "sender": "scammer",
            "text": "Your bank account will be blocked today. Verify immediately.",
            "timestamp": "2026-01-21T10:15:30Z"
        },
        "conversationHistory": [],
        "metadata": {"channel": "SMS", "language": "English", "locale": "IN"}
    });
    let req = normalize_request(&body);
    assert_eq!(req.session_id, "wertyu-dfghj-ertyui");
    assert_eq!(req.message.sender, "scammer");
    assert!(req.conversation_history.is_empty());
    assert_eq!(req.total_messages(), 2);
    assert_eq!(req.turn_number(), 1);
}

/// Follow-up turns carry epoch-millisecond timestamps in the history.
#[test]
fn test_follow_up_with_epoch_timestamps() {
    let body = json!({
        "sessionId": "s-2",
        "message": {"sender": "scammer", "text": "Share your UPI ID", "timestamp": 1769000100000_i64},
        "conversationHistory": [
            {"sender": "scammer", "text": "Your account is blocked", "timestamp": 1769000000000_i64},
            {"sender": "user", "text": "Why?", "timestamp": 1769000050000_i64}
        ]
    });
    let req = normalize_request(&body);
    let metrics = engagement_metrics(&req, None, chrono::Utc::now());
    assert_eq!(metrics.engagement_duration_seconds, 100);
    assert_eq!(metrics.total_messages_exchanged, 4);
}

/// Response shape: { status, reply, scamDetected, scamType, confidence,
/// extractedIntelligence, engagementMetrics, agentNotes }
#[test]
fn test_response_shape() {
    let mut resp = HoneypotResponse::fallback("Which account?", "notes");
    resp.scam_detected = true;
    resp.scam_type = "bank_fraud".into();
    resp.confidence = 0.93;
    resp.extracted_intelligence = compute_cumulative_intelligence(
        "Pay to scam.pay@okaxis",
        &["Call +91-9876543210", "Open http://bit.ly/fake-kyc"],
    );

    let v = serde_json::to_value(&resp).unwrap();
    assert_eq!(v["status"], "success");
    assert!(v["reply"].is_string());
    assert!(v["scamDetected"].is_boolean());
    assert!(v["scamType"].is_string());
    assert!(v["confidence"].is_number());
    assert!(v["agentNotes"].is_string());
    assert!(v["engagementMetrics"]["engagementDurationSeconds"].is_number());
    assert!(v["engagementMetrics"]["totalMessagesExchanged"].is_number());

    let intel = &v["extractedIntelligence"];
    for key in [
        "bankAccounts",
        "upiIds",
        "phishingLinks",
        "phoneNumbers",
        "emailAddresses",
        "caseIds",
        "policyNumbers",
        "orderNumbers",
        "suspiciousKeywords",
    ] {
        assert!(intel[key].is_array(), "extractedIntelligence.{key} must be an array");
    }
    assert_eq!(intel["upiIds"], json!(["scam.pay@okaxis"]));
    assert_eq!(intel["phoneNumbers"], json!(["+91-9876543210"]));
    assert_eq!(intel["phishingLinks"], json!(["http://bit.ly/fake-kyc"]));
}

/// Callback body posted to the scoring endpoint.
#[test]
fn test_callback_shape() {
    let payload = CallbackPayload {
        session_id: "s-3".into(),
        scam_detected: true,
        total_messages_exchanged: 10,
        engagement_duration_seconds: 240,
        scam_type: "upi_fraud".into(),
        extracted_intelligence: ExtractedIntelligence {
            upi_ids: vec!["a@ybl".into()],
            ..Default::default()
        },
        agent_notes: "Scam type: upi_fraud.".into(),
    };
    let v = serde_json::to_value(&payload).unwrap();
    let keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
    for key in [
        "sessionId",
        "scamDetected",
        "totalMessagesExchanged",
        "engagementDurationSeconds",
        "scamType",
        "extractedIntelligence",
        "agentNotes",
    ] {
        assert!(keys.contains(&key), "callback missing {key}");
    }
    assert_eq!(v["extractedIntelligence"]["upiIds"], json!(["a@ybl"]));
}

/// Error shape: { status: "error", message }
#[test]
fn test_error_shape() {
    let v = serde_json::to_value(ErrorBody::new("Invalid API key")).unwrap();
    assert_eq!(v, json!({"status": "error", "message": "Invalid API key"}));
}

/// Intelligence deserializes from partial objects (missing lists default to empty).
#[test]
fn test_partial_intelligence_deserializes() {
    let intel: ExtractedIntelligence =
        serde_json::from_value(json!({"upiIds": ["x@paytm"]})).unwrap();
    assert_eq!(intel.upi_ids, vec!["x@paytm"]);
    assert!(intel.bank_accounts.is_empty());
}
