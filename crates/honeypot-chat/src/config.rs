//! Backend selection from the environment.

use serde::Serialize;
use tracing::info;

use crate::types::BackendKind;

pub const DEFAULT_TEMPERATURE: f64 = 0.8;
pub const DEFAULT_MAX_TOKENS: usize = 150;

/// One configured backend.
#[derive(Debug, Clone, Serialize)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub model: String,
    #[serde(skip_serializing)]
    pub api_key: String,
}

/// Backends with a key present, in fallback order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LLMConfig {
    pub backends: Vec<BackendConfig>,
}

impl LLMConfig {
    /// Read keys and model overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read keys and model overrides through `lookup`. Missing keys just shorten the chain.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let backends: Vec<BackendConfig> = BackendKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let api_key = lookup(kind.key_var()).filter(|k| !k.trim().is_empty())?;
                let model = lookup(kind.model_var())
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| kind.default_model().to_string());
                Some(BackendConfig {
                    kind,
                    model,
                    api_key,
                })
            })
            .collect();

        let names: Vec<String> = backends
            .iter()
            .map(|b| format!("{}:{}", b.kind, b.model))
            .collect();
        info!("LLM backends configured: [{}]", names.join(", "));

        Self { backends }
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}
