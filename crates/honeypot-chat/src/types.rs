//! Chat and provider types shared by the collaborators.

use serde::{Deserialize, Serialize};

/// Hosted backend speaking the OpenAI chat-completions dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Groq,
    Cerebras,
    OpenAI,
    Gemini,
}

impl BackendKind {
    /// Default fallback order.
    pub const ALL: [BackendKind; 4] = [
        BackendKind::Groq,
        BackendKind::Cerebras,
        BackendKind::OpenAI,
        BackendKind::Gemini,
    ];

    pub fn chat_completions_url(self) -> &'static str {
        match self {
            BackendKind::Groq => "https://api.groq.com/openai/v1/chat/completions",
            BackendKind::Cerebras => "https://api.cerebras.ai/v1/chat/completions",
            BackendKind::OpenAI => "https://api.openai.com/v1/chat/completions",
            BackendKind::Gemini => {
                "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
            }
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            BackendKind::Groq => "llama-3.3-70b-versatile",
            BackendKind::Cerebras => "llama3.1-8b",
            BackendKind::OpenAI => "gpt-4o-mini",
            BackendKind::Gemini => "gemini-2.5-flash",
        }
    }

    /// Environment variable holding the API key.
    pub fn key_var(self) -> &'static str {
        match self {
            BackendKind::Groq => "GROQ_API_KEY",
            BackendKind::Cerebras => "CEREBRAS_API_KEY",
            BackendKind::OpenAI => "OPENAI_API_KEY",
            BackendKind::Gemini => "GEMINI_API_KEY",
        }
    }

    /// Environment variable overriding the model.
    pub fn model_var(self) -> &'static str {
        match self {
            BackendKind::Groq => "GROQ_MODEL",
            BackendKind::Cerebras => "CEREBRAS_MODEL",
            BackendKind::OpenAI => "OPENAI_MODEL",
            BackendKind::Gemini => "GEMINI_MODEL",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Groq => write!(f, "groq"),
            BackendKind::Cerebras => write!(f, "cerebras"),
            BackendKind::OpenAI => write!(f, "openai"),
            BackendKind::Gemini => write!(f, "gemini"),
        }
    }
}

/// Chat message sent to a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }
}

/// One prior turn as seen by the collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLine {
    pub sender: String,
    pub text: String,
}

impl HistoryLine {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }

    /// Whether this turn came from the other party rather than the persona.
    pub fn is_from_scammer(&self) -> bool {
        !matches!(
            self.sender.to_lowercase().as_str(),
            "user" | "victim" | "agent" | "honeypot" | "assistant"
        )
    }
}

impl honeypot_intel::ConversationTurn for HistoryLine {
    fn text(&self) -> Option<&str> {
        Some(self.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_display_and_defaults() {
        assert_eq!(BackendKind::Groq.to_string(), "groq");
        assert_eq!(BackendKind::Gemini.default_model(), "gemini-2.5-flash");
        assert!(BackendKind::Cerebras
            .chat_completions_url()
            .starts_with("https://api.cerebras.ai"));
    }

    #[test]
    fn test_history_sender_roles() {
        assert!(HistoryLine::new("scammer", "hi").is_from_scammer());
        assert!(!HistoryLine::new("user", "hi").is_from_scammer());
        assert!(!HistoryLine::new("Agent", "hi").is_from_scammer());
    }
}
