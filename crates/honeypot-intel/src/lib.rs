//! Honeypot Intel: entity extraction, email/handle disambiguation, and
//! cumulative merge across a conversation.

pub mod disambiguate;
pub mod extract;
pub mod merge;
pub mod pipeline;
pub mod types;

#[cfg(test)]
mod fixtures;

pub use extract::extract;
pub use extract::keywords::{categories_present, KeywordCategory};
pub use merge::merge;
pub use pipeline::{analyze_turn, compute_cumulative_intelligence, ConversationTurn, TurnIntelligence};
pub use types::{ExtractedIntelligence, TRACKED_FIELDS};
