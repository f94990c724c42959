//! Reporting results to the scoring endpoint.

use std::time::Duration;

use async_trait::async_trait;
use honeypot_core::{Error, Result};
use reqwest::Client;
use tracing::{info, warn};

use crate::types::CallbackPayload;

/// Turn number from which every scam turn is reported.
pub const CALLBACK_FROM_TURN: usize = 3;
/// Reports are also sent whenever the message total is a multiple of this.
pub const CALLBACK_EVERY_MESSAGES: usize = 5;

/// Delivers a session result to the scoring endpoint.
#[async_trait]
pub trait CallbackReporter: Send + Sync {
    async fn report(&self, payload: &CallbackPayload) -> Result<()>;
}

/// Decide whether this turn's result should be reported.
///
/// Only scam turns are reported, and then only when the turn surfaced fresh
/// tracked intelligence, the conversation has reached
/// [`CALLBACK_FROM_TURN`], or the message total hits a reporting interval.
pub fn should_send_callback(
    scam_detected: bool,
    fresh_intel: bool,
    turn_number: usize,
    total_messages: usize,
) -> bool {
    scam_detected
        && (fresh_intel
            || turn_number >= CALLBACK_FROM_TURN
            || total_messages % CALLBACK_EVERY_MESSAGES == 0)
}

/// POSTs JSON to the configured URL.
pub struct HttpCallbackReporter {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpCallbackReporter {
    pub fn new(client: Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CallbackReporter for HttpCallbackReporter {
    async fn report(&self, payload: &CallbackPayload) -> Result<()> {
        info!(
            session_id = %payload.session_id,
            url = %self.url,
            "Sending callback"
        );
        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(self.timeout.as_secs())
                } else {
                    Error::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(session_id = %payload.session_id, %status, "Callback rejected");
            return Err(Error::Http(format!("callback returned {status}: {body}")));
        }
        info!(session_id = %payload.session_id, %status, "Callback delivered");
        Ok(())
    }
}
