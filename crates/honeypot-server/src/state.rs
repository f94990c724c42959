//! Shared application state.

use std::sync::Arc;

use honeypot_chat::{
    ChatBackend, FallbackChain, HybridClassifier, LLMConfig, PersonaReplyGenerator,
    ReplyGenerator, ScamClassifier,
};
use honeypot_core::HoneypotConfig;
use honeypot_protocol::{CallbackReporter, HttpCallbackReporter, InMemorySessionStore, SessionStore};
use reqwest::Client;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: HoneypotConfig,
    pub sessions: Arc<dyn SessionStore>,
    pub classifier: Arc<dyn ScamClassifier>,
    pub replies: Arc<dyn ReplyGenerator>,
    pub callbacks: Arc<dyn CallbackReporter>,
}

impl AppState {
    /// Wire up the production collaborators.
    pub fn new(config: HoneypotConfig, llm_config: &LLMConfig) -> Self {
        let client = Client::new();
        let chain: Arc<dyn ChatBackend> = Arc::new(FallbackChain::from_config(
            client.clone(),
            llm_config,
            config.llm_timeout(),
        ));

        let classifier_backend = if llm_config.is_empty() {
            None
        } else {
            Some(chain.clone())
        };
        let callbacks = HttpCallbackReporter::new(
            client,
            config.callback_url.clone(),
            config.callback_timeout(),
        );

        Self {
            sessions: Arc::new(InMemorySessionStore::new()),
            classifier: Arc::new(HybridClassifier::new(classifier_backend)),
            replies: Arc::new(PersonaReplyGenerator::new(chain)),
            callbacks: Arc::new(callbacks),
            config,
        }
    }

    /// Assemble state from explicit collaborators.
    pub fn with_collaborators(
        config: HoneypotConfig,
        sessions: Arc<dyn SessionStore>,
        classifier: Arc<dyn ScamClassifier>,
        replies: Arc<dyn ReplyGenerator>,
        callbacks: Arc<dyn CallbackReporter>,
    ) -> Self {
        Self {
            config,
            sessions,
            classifier,
            replies,
            callbacks,
        }
    }
}
