//! LLM collaborators for the honeypot: hosted chat backends behind a
//! fallback chain, the victim persona, and scam classification.
//!
//! Nothing here is required for intelligence extraction. With no backends
//! configured the persona answers with canned stalling replies and the
//! classifier runs on heuristics alone.

pub mod classifier;
pub mod config;
pub mod fallback;
pub mod providers;
pub mod reply;
pub mod scam_type;
pub mod types;

pub use classifier::{HybridClassifier, ScamClassifier, ScamVerdict};
pub use config::LLMConfig;
pub use fallback::FallbackChain;
pub use providers::{ChatBackend, OpenAiCompatBackend, ProviderError};
pub use reply::{PersonaReplyGenerator, ReplyContext, ReplyGenerator};
pub use scam_type::{detect_scam_type, ScamType};
pub use types::*;
