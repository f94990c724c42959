//! Wire types for the honeypot endpoint and the scoring callback.

use chrono::{DateTime, Utc};
use honeypot_intel::{ConversationTurn, ExtractedIntelligence};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CHANNEL: &str = "SMS";
pub const DEFAULT_LANGUAGE: &str = "English";
pub const DEFAULT_LOCALE: &str = "IN";

/// One chat message after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub text: String,
    /// `None` when the inbound timestamp was missing or unparseable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Message {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            timestamp: None,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl ConversationTurn for Message {
    fn text(&self) -> Option<&str> {
        Some(self.text.as_str())
    }
}

/// Canonical inbound request, whatever shape the caller sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoneypotRequest {
    pub session_id: String,
    pub message: Message,
    pub conversation_history: Vec<Message>,
    pub channel: String,
    pub language: String,
    pub locale: String,
}

impl HoneypotRequest {
    /// Messages exchanged including this turn and the reply to it.
    pub fn total_messages(&self) -> usize {
        self.conversation_history.len() + 2
    }

    /// 1-based index of the current inbound message among scammer turns.
    pub fn turn_number(&self) -> usize {
        self.conversation_history.len() / 2 + 1
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    pub engagement_duration_seconds: u64,
    pub total_messages_exchanged: usize,
}

/// Response body for `POST /honeypot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoneypotResponse {
    pub status: String,
    pub reply: String,
    pub scam_detected: bool,
    pub scam_type: String,
    pub confidence: f64,
    pub extracted_intelligence: ExtractedIntelligence,
    pub engagement_metrics: EngagementMetrics,
    pub agent_notes: String,
}

impl HoneypotResponse {
    /// Well-formed reply for requests that could not be processed.
    pub fn fallback(reply: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            status: "success".into(),
            reply: reply.into(),
            scam_detected: false,
            scam_type: "unknown".into(),
            confidence: 0.0,
            extracted_intelligence: ExtractedIntelligence::default(),
            engagement_metrics: EngagementMetrics::default(),
            agent_notes: notes.into(),
        }
    }
}

/// Body POSTed to the scoring endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackPayload {
    pub session_id: String,
    pub scam_detected: bool,
    pub total_messages_exchanged: usize,
    pub engagement_duration_seconds: u64,
    pub scam_type: String,
    pub extracted_intelligence: ExtractedIntelligence,
    pub agent_notes: String,
}

/// Error body for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_wire_shape() {
        let resp = HoneypotResponse::fallback("Who is this?", "not processed");
        let v = serde_json::to_value(&resp).unwrap();
        for key in [
            "status",
            "reply",
            "scamDetected",
            "scamType",
            "confidence",
            "extractedIntelligence",
            "engagementMetrics",
            "agentNotes",
        ] {
            assert!(v.get(key).is_some(), "missing {key}");
        }
        assert_eq!(
            v["engagementMetrics"],
            json!({"engagementDurationSeconds": 0, "totalMessagesExchanged": 0})
        );
    }

    #[test]
    fn test_callback_wire_shape() {
        let payload = CallbackPayload {
            session_id: "s-1".into(),
            scam_detected: true,
            total_messages_exchanged: 6,
            engagement_duration_seconds: 90,
            scam_type: "bank_fraud".into(),
            extracted_intelligence: ExtractedIntelligence::default(),
            agent_notes: "notes".into(),
        };
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["sessionId"], "s-1");
        assert_eq!(v["totalMessagesExchanged"], 6);
        assert_eq!(v["engagementDurationSeconds"], 90);
        assert!(v["extractedIntelligence"]["upiIds"].is_array());
    }

    #[test]
    fn test_counts() {
        let req = HoneypotRequest {
            session_id: "s".into(),
            message: Message::new("scammer", "hi"),
            conversation_history: vec![
                Message::new("scammer", "a"),
                Message::new("user", "b"),
                Message::new("scammer", "c"),
                Message::new("user", "d"),
            ],
            channel: DEFAULT_CHANNEL.into(),
            language: DEFAULT_LANGUAGE.into(),
            locale: DEFAULT_LOCALE.into(),
        };
        assert_eq!(req.total_messages(), 6);
        assert_eq!(req.turn_number(), 3);
    }
}
