//! Ordered provider fallback with per-attempt timeouts.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::LLMConfig;
use crate::providers::{ChatBackend, OpenAiCompatBackend, ProviderError};
use crate::types::ChatMessage;

/// Tries each backend in turn until one succeeds.
///
/// With `round_robin` set, the starting backend rotates on every call so
/// load spreads across hosts; the remaining backends still serve as fallbacks.
pub struct FallbackChain {
    backends: Vec<Arc<dyn ChatBackend>>,
    attempt_timeout: Duration,
    round_robin: bool,
    next: AtomicUsize,
}

impl FallbackChain {
    pub fn new(backends: Vec<Arc<dyn ChatBackend>>, attempt_timeout: Duration) -> Self {
        Self {
            backends,
            attempt_timeout,
            round_robin: false,
            next: AtomicUsize::new(0),
        }
    }

    /// Build one OpenAI-compatible backend per configured key.
    pub fn from_config(client: Client, config: &LLMConfig, attempt_timeout: Duration) -> Self {
        let backends = config
            .backends
            .iter()
            .map(|b| Arc::new(OpenAiCompatBackend::new(client.clone(), b)) as Arc<dyn ChatBackend>)
            .collect();
        Self::new(backends, attempt_timeout).with_round_robin(true)
    }

    pub fn with_round_robin(mut self, enabled: bool) -> Self {
        self.round_robin = enabled;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// Backend indices in the order this call will try them.
    fn attempt_order(&self) -> Vec<usize> {
        let n = self.backends.len();
        if n == 0 {
            return Vec::new();
        }
        let start = if self.round_robin {
            self.next.fetch_add(1, Ordering::Relaxed) % n
        } else {
            0
        };
        (0..n).map(|i| (start + i) % n).collect()
    }
}

#[async_trait]
impl ChatBackend for FallbackChain {
    fn name(&self) -> String {
        let names: Vec<String> = self.backends.iter().map(|b| b.name()).collect();
        format!("fallback[{}]", names.join(","))
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f64,
        max_tokens: usize,
    ) -> Result<String, ProviderError> {
        if self.backends.is_empty() {
            return Err(ProviderError::Exhausted("no backends configured".into()));
        }

        let mut failures = Vec::new();
        for idx in self.attempt_order() {
            let backend = &self.backends[idx];
            let attempt = backend.complete(messages, temperature, max_tokens);
            match tokio::time::timeout(self.attempt_timeout, attempt).await {
                Ok(Ok(text)) => {
                    debug!(backend = %backend.name(), "completion succeeded");
                    return Ok(text);
                }
                Ok(Err(e)) => {
                    warn!(backend = %backend.name(), error = %e, "backend failed, trying next");
                    failures.push(format!("{}: {}", backend.name(), e));
                }
                Err(_) => {
                    let err = ProviderError::Timeout(self.attempt_timeout.as_secs());
                    warn!(backend = %backend.name(), error = %err, "backend timed out, trying next");
                    failures.push(format!("{}: {}", backend.name(), err));
                }
            }
        }
        Err(ProviderError::Exhausted(failures.join("; ")))
    }
}
