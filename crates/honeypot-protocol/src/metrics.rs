//! Engagement metrics for a turn.

use chrono::{DateTime, Utc};

use crate::types::{EngagementMetrics, HoneypotRequest};

/// Count messages and measure how long the conversation has run.
///
/// Duration runs from the earliest history timestamp to the current
/// message's timestamp. When the history carries no usable timestamps the
/// session's recorded start is used instead, and a missing current
/// timestamp means `now`. The result is never negative.
pub fn engagement_metrics(
    req: &HoneypotRequest,
    session_started: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> EngagementMetrics {
    let end = req.message.timestamp.unwrap_or(now);
    let start = req
        .conversation_history
        .iter()
        .filter_map(|m| m.timestamp)
        .min()
        .or(session_started)
        .unwrap_or(end);

    EngagementMetrics {
        engagement_duration_seconds: (end - start).num_seconds().max(0) as u64,
        total_messages_exchanged: req.total_messages(),
    }
}
