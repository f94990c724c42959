//! Stub collaborators and router helpers for route tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::to_bytes;
use axum::response::Response;
use axum::Router;
use honeypot_chat::{HistoryLine, ReplyContext, ReplyGenerator, ScamClassifier, ScamVerdict};
use honeypot_core::HoneypotConfig;
use honeypot_protocol::{CallbackPayload, CallbackReporter, InMemorySessionStore, SessionStore};
use parking_lot::Mutex;

use crate::routes::build_router;
use crate::state::AppState;

pub const TEST_API_KEY: &str = "test-key";
pub const STUB_REPLY: &str = "Oh no, which account should I use?";

/// Returns a fixed verdict and counts calls.
pub struct StubClassifier {
    is_scam: bool,
    calls: AtomicUsize,
}

impl StubClassifier {
    pub fn always() -> Arc<Self> {
        Arc::new(Self {
            is_scam: true,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn never() -> Arc<Self> {
        Arc::new(Self {
            is_scam: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScamClassifier for StubClassifier {
    async fn classify(&self, _text: &str, _history: &[HistoryLine]) -> ScamVerdict {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ScamVerdict {
            is_scam: self.is_scam,
            confidence: if self.is_scam { 0.9 } else { 0.1 },
            patterns: Vec::new(),
            reasoning: "stub".into(),
        }
    }
}

#[derive(Default)]
pub struct StubReplies {
    calls: AtomicUsize,
}

impl StubReplies {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReplyGenerator for StubReplies {
    async fn generate(&self, _ctx: &ReplyContext) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        STUB_REPLY.to_string()
    }
}

/// Records every payload instead of POSTing it.
#[derive(Default)]
pub struct RecordingReporter {
    payloads: Mutex<Vec<CallbackPayload>>,
}

impl RecordingReporter {
    pub fn payloads(&self) -> Vec<CallbackPayload> {
        self.payloads.lock().clone()
    }
}

#[async_trait]
impl CallbackReporter for RecordingReporter {
    async fn report(&self, payload: &CallbackPayload) -> honeypot_core::Result<()> {
        self.payloads.lock().push(payload.clone());
        Ok(())
    }
}

/// Handles on the stubs behind a test router.
pub struct Harness {
    pub sessions: Arc<dyn SessionStore>,
    pub classifier: Arc<StubClassifier>,
    pub replies: Arc<StubReplies>,
    pub reporter: Arc<RecordingReporter>,
}

pub fn test_config() -> HoneypotConfig {
    HoneypotConfig::from_lookup(|key| match key {
        "HONEYPOT_API_KEY" => Some(TEST_API_KEY.to_string()),
        _ => None,
    })
    .unwrap()
}

pub fn test_router() -> (Router, Harness) {
    test_router_with(StubClassifier::always())
}

pub fn test_router_with(classifier: Arc<StubClassifier>) -> (Router, Harness) {
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let replies = Arc::new(StubReplies::default());
    let reporter = Arc::new(RecordingReporter::default());

    let state = AppState::with_collaborators(
        test_config(),
        sessions.clone(),
        classifier.clone(),
        replies.clone(),
        reporter.clone(),
    );
    let harness = Harness {
        sessions,
        classifier,
        replies,
        reporter,
    };
    (build_router(Arc::new(state)), harness)
}

pub async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
