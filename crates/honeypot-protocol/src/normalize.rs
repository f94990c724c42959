//! Lenient request normalization.
//!
//! Callers send several shapes: `sessionId` or `session_id`, `message` as an
//! object or a bare string, history under three different keys, timestamps
//! as ISO strings or epoch numbers. Everything funnels into one
//! [`HoneypotRequest`] before the core sees it.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tracing::debug;

use crate::types::{HoneypotRequest, Message, DEFAULT_CHANNEL, DEFAULT_LANGUAGE, DEFAULT_LOCALE};

/// Epoch values above this are taken as milliseconds.
const EPOCH_MILLIS_THRESHOLD: f64 = 1e11;

/// Normalize any JSON value into a request. Never fails; missing parts get defaults.
pub fn normalize_request(body: &Value) -> HoneypotRequest {
    let session_id = first_str(body, &["sessionId", "session_id", "sessionID"])
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            let id = uuid::Uuid::new_v4().to_string();
            debug!(session_id = %id, "request without session id, generated one");
            id
        });

    let message = body
        .get("message")
        .and_then(|m| normalize_message(m, "scammer"))
        .or_else(|| {
            body.get("text")
                .and_then(Value::as_str)
                .map(|t| Message::new("scammer", t))
        })
        .unwrap_or_else(|| {
            debug!("request without message text");
            Message::new("scammer", "")
        });

    let conversation_history = ["conversationHistory", "history", "messages"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_array))
        .map(|items| {
            items
                .iter()
                .filter_map(|item| normalize_message(item, "scammer"))
                .collect()
        })
        .unwrap_or_default();

    let metadata = body.get("metadata");
    let meta_str = |key: &str, default: &str| {
        metadata
            .and_then(|m| m.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(default)
            .to_string()
    };

    HoneypotRequest {
        session_id,
        message,
        conversation_history,
        channel: meta_str("channel", DEFAULT_CHANNEL),
        language: meta_str("language", DEFAULT_LANGUAGE),
        locale: meta_str("locale", DEFAULT_LOCALE),
    }
}

/// A message given as `{sender, text, timestamp}` or as a bare string.
fn normalize_message(value: &Value, default_sender: &str) -> Option<Message> {
    match value {
        Value::String(text) => Some(Message::new(default_sender, text.as_str())),
        Value::Object(_) => {
            let text = first_str(value, &["text", "content", "message"])?;
            let sender = first_str(value, &["sender", "role", "from"]).unwrap_or(default_sender);
            Some(Message {
                sender: sender.to_string(),
                text: text.to_string(),
                timestamp: value.get("timestamp").and_then(parse_timestamp),
            })
        }
        _ => None,
    }
}

fn first_str<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| value.get(*k).and_then(Value::as_str))
}

/// ISO-8601 / RFC 3339 strings, numeric strings, or epoch numbers (seconds, or milliseconds above 1e11).
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_f64().and_then(from_epoch),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(Utc.from_utc_datetime(&naive));
            }
            if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(Utc.from_utc_datetime(&naive));
            }
            s.parse::<f64>().ok().and_then(from_epoch)
        }
        _ => None,
    }
}

fn from_epoch(raw: f64) -> Option<DateTime<Utc>> {
    if !raw.is_finite() || raw < 0.0 {
        return None;
    }
    let millis = if raw > EPOCH_MILLIS_THRESHOLD {
        raw as i64
    } else {
        (raw * 1000.0) as i64
    };
    Utc.timestamp_millis_opt(millis).single()
}
