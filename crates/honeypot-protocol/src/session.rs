//! Per-session bookkeeping between turns.
//!
//! Only timing and counters live here; intelligence is always recomputed
//! from the visible history. [`InMemorySessionStore`] keeps everything in
//! process memory, so a restart forgets every session.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tracing::debug;

/// What the server remembers about one conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub started_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub turns: usize,
    pub scam_flagged: bool,
    pub callbacks_sent: usize,
}

impl SessionState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            started_at: now,
            last_seen: now,
            turns: 0,
            scam_flagged: false,
            callbacks_sent: 0,
        }
    }
}

/// Storage for session state, keyed by session id.
pub trait SessionStore: Send + Sync {
    fn get(&self, session_id: &str) -> Option<SessionState>;

    fn set(&self, session_id: &str, state: SessionState);

    /// Record a turn, creating the session on first sight. Returns the updated state.
    fn touch(&self, session_id: &str, now: DateTime<Utc>) -> SessionState;

    /// Mark the session as a confirmed scam.
    fn flag_scam(&self, session_id: &str);

    fn record_callback(&self, session_id: &str);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local, non-durable store.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, SessionState>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, session_id: &str) -> Option<SessionState> {
        self.sessions.get(session_id).map(|s| s.clone())
    }

    fn set(&self, session_id: &str, state: SessionState) {
        self.sessions.insert(session_id.to_string(), state);
    }

    fn touch(&self, session_id: &str, now: DateTime<Utc>) -> SessionState {
        let mut entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                debug!(session_id, "new session");
                SessionState::new(now)
            });
        entry.turns += 1;
        entry.last_seen = now;
        entry.clone()
    }

    fn flag_scam(&self, session_id: &str) {
        if let Some(mut entry) = self.sessions.get_mut(session_id) {
            entry.scam_flagged = true;
        }
    }

    fn record_callback(&self, session_id: &str) {
        if let Some(mut entry) = self.sessions.get_mut(session_id) {
            entry.callbacks_sent += 1;
        }
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}
