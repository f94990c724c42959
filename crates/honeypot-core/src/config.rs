//! Server configuration loaded from the environment.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CALLBACK_URL: &str = "https://hackathon.guvi.in/api/updateHoneyPotFinalResult";
pub const DEFAULT_CALLBACK_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 12;
pub const DEFAULT_DEEP_CONVERSATION_TURNS: usize = 4;

/// Top-level honeypot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoneypotConfig {
    /// HTTP server port.
    pub port: u16,
    /// Shared secret expected in the `x-api-key` header.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Scoring endpoint that receives per-session results.
    pub callback_url: String,
    /// Timeout for a single callback POST, in seconds.
    pub callback_timeout_secs: u64,
    /// Timeout for a single LLM backend attempt, in seconds.
    pub llm_timeout_secs: u64,
    /// History length beyond which the conversation is treated as an
    /// established scam without re-classifying.
    pub deep_conversation_turns: usize,
}

impl HoneypotConfig {
    /// Create configuration from environment variables and defaults.
    ///
    /// `HONEYPOT_API_KEY` is required; everything else falls back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("HONEYPOT_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::Config("HONEYPOT_API_KEY is required".into()))?;

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let callback_url = lookup("CALLBACK_URL")
            .or_else(|| lookup("GUVI_CALLBACK_URL"))
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CALLBACK_URL.to_string());
        let callback_timeout_secs =
            parse_or(&lookup, "CALLBACK_TIMEOUT_SECS", DEFAULT_CALLBACK_TIMEOUT_SECS)?;
        let llm_timeout_secs = parse_or(&lookup, "LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?;
        let deep_conversation_turns = parse_or(
            &lookup,
            "DEEP_CONVERSATION_TURNS",
            DEFAULT_DEEP_CONVERSATION_TURNS,
        )?;

        Ok(Self {
            port,
            api_key,
            callback_url,
            callback_timeout_secs,
            llm_timeout_secs,
            deep_conversation_turns,
        })
    }

    pub fn callback_timeout(&self) -> Duration {
        Duration::from_secs(self.callback_timeout_secs)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{key} has invalid value '{raw}'"))),
        _ => Ok(default),
    }
}
