//! Hosted LLM backends.
//!
//! Every supported host speaks the OpenAI chat-completions dialect, so one
//! streaming client covers all of them. Tokens arrive via SSE and are
//! collected into a single completion.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use reqwest::Client;
use serde_json::json;
use tokio_stream::StreamExt;
use tracing::debug;

use crate::config::BackendConfig;
use crate::types::{BackendKind, ChatMessage};

/// Errors returned by chat backends.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("provider returned non-success status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("provider stream error: {0}")]
    Stream(String),
    #[error("provider returned an empty completion")]
    Empty,
    #[error("provider timed out after {0}s")]
    Timeout(u64),
    #[error("all providers failed: {0}")]
    Exhausted(String),
}

impl From<ProviderError> for honeypot_core::Error {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Timeout(secs) => honeypot_core::Error::Timeout(secs),
            other => honeypot_core::Error::Provider(other.to_string()),
        }
    }
}

/// A text-generation backend.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> String;

    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f64,
        max_tokens: usize,
    ) -> Result<String, ProviderError>;
}

/// Boxed stream type for the SSE token stream.
pub type BoxedStream = Pin<Box<dyn Stream<Item = StreamChunk> + Send>>;

/// A single streamed token or error.
pub enum StreamChunk {
    Token(String),
    Done { tokens_used: usize },
    Error(ProviderError),
}

/// Client for any OpenAI-compatible chat-completions endpoint.
pub struct OpenAiCompatBackend {
    client: Client,
    kind: BackendKind,
    url: String,
    model: String,
    api_key: String,
}

impl OpenAiCompatBackend {
    pub fn new(client: Client, config: &BackendConfig) -> Self {
        Self {
            client,
            kind: config.kind,
            url: config.kind.chat_completions_url().to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Point at a different endpoint, e.g. a local proxy.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn stream(&self, messages: &[ChatMessage], temperature: f64, max_tokens: usize) -> BoxedStream {
        Box::pin(stream_openai_compat(
            self.client.clone(),
            &self.url,
            messages,
            self.model.clone(),
            self.api_key.clone(),
            temperature,
            max_tokens,
        ))
    }
}

#[async_trait]
impl ChatBackend for OpenAiCompatBackend {
    fn name(&self) -> String {
        format!("{}:{}", self.kind, self.model)
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f64,
        max_tokens: usize,
    ) -> Result<String, ProviderError> {
        let mut stream = self.stream(messages, temperature, max_tokens);
        let mut text = String::new();
        while let Some(chunk) = stream.next().await {
            match chunk {
                StreamChunk::Token(t) => text.push_str(&t),
                StreamChunk::Done { tokens_used } => {
                    debug!(backend = %self.name(), tokens_used, "completion finished");
                    break;
                }
                StreamChunk::Error(e) => return Err(e),
            }
        }
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(ProviderError::Empty);
        }
        Ok(text)
    }
}

/// Stream from an OpenAI-compatible API.
fn stream_openai_compat(
    client: Client,
    url: &str,
    messages: &[ChatMessage],
    model: String,
    api_key: String,
    temperature: f64,
    max_tokens: usize,
) -> impl Stream<Item = StreamChunk> + Send + 'static {
    let url = url.to_string();
    let msgs: Vec<serde_json::Value> = messages
        .iter()
        .map(|m| json!({"role": m.role, "content": m.content}))
        .collect();

    async_stream::stream! {
        let body = json!({
            "model": model,
            "messages": msgs,
            "temperature": temperature,
            "max_tokens": max_tokens,
            "stream": true,
        });

        debug!("Streaming from {} with model {}", url, model);

        let response = match client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                yield StreamChunk::Error(ProviderError::Request(e));
                return;
            }
        };

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            yield StreamChunk::Error(ProviderError::HttpStatus { status, body: truncate(&body, 256) });
            return;
        }

        let mut stream = response.bytes_stream();
        let mut buffer = String::new();
        let mut token_count = 0usize;

        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    yield StreamChunk::Error(ProviderError::Stream(e.to_string()));
                    return;
                }
            };

            buffer.push_str(&String::from_utf8_lossy(&bytes));

            // Process complete SSE lines
            while let Some(line_end) = buffer.find('\n') {
                let line = buffer[..line_end].trim().to_string();
                buffer = buffer[line_end + 1..].to_string();

                if let Some(token) = parse_sse_line(&line) {
                    match token {
                        SseEvent::Done => {
                            yield StreamChunk::Done { tokens_used: token_count };
                            return;
                        }
                        SseEvent::Token(content) => {
                            token_count += 1;
                            yield StreamChunk::Token(content);
                        }
                    }
                }
            }
        }

        yield StreamChunk::Done { tokens_used: token_count };
    }
}

#[derive(Debug, PartialEq, Eq)]
enum SseEvent {
    Token(String),
    Done,
}

fn parse_sse_line(line: &str) -> Option<SseEvent> {
    if line.is_empty() || line.starts_with(':') {
        return None;
    }
    let data = line.strip_prefix("data:")?.trim();
    if data == "[DONE]" {
        return Some(SseEvent::Done);
    }
    let parsed: serde_json::Value = serde_json::from_str(data).ok()?;
    let content = parsed["choices"][0]["delta"]["content"].as_str()?;
    (!content.is_empty()).then(|| SseEvent::Token(content.to_string()))
}

fn truncate(body: &str, max_chars: usize) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > max_chars {
        let short: String = collapsed.chars().take(max_chars).collect();
        return format!("{short}...[truncated]");
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_line() {
        let line = r#"data: {"choices":[{"delta":{"content":"Hello"}}]}"#;
        assert_eq!(parse_sse_line(line), Some(SseEvent::Token("Hello".into())));
    }

    #[test]
    fn test_parse_done_and_noise() {
        assert_eq!(parse_sse_line("data: [DONE]"), Some(SseEvent::Done));
        assert_eq!(parse_sse_line(": keep-alive"), None);
        assert_eq!(parse_sse_line(""), None);
        assert_eq!(parse_sse_line("event: ping"), None);
        assert_eq!(
            parse_sse_line(r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#),
            None
        );
    }

    #[test]
    fn test_truncate_error_body() {
        let long = "x".repeat(300);
        let short = truncate(&long, 256);
        assert!(short.ends_with("...[truncated]"));
        assert_eq!(truncate("bad   request\n", 256), "bad request");
    }

    #[test]
    fn test_backend_name() {
        let backend = OpenAiCompatBackend::new(
            Client::new(),
            &BackendConfig {
                kind: BackendKind::Groq,
                model: "llama-3.3-70b-versatile".into(),
                api_key: "k".into(),
            },
        );
        assert_eq!(backend.name(), "groq:llama-3.3-70b-versatile");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_request_error() {
        let backend = OpenAiCompatBackend::new(
            Client::new(),
            &BackendConfig {
                kind: BackendKind::OpenAI,
                model: "gpt-4o-mini".into(),
                api_key: "k".into(),
            },
        )
        .with_url("http://127.0.0.1:9/v1/chat/completions");
        let err = backend
            .complete(&[ChatMessage::user("hi")], 0.5, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Request(_)));
    }
}
