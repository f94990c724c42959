//! Conversation-level intelligence, recomputed from the visible history on every turn.

use crate::extract::extract;
use crate::merge::merge;
use crate::types::ExtractedIntelligence;

/// Anything carrying the text of one conversation turn.
pub trait ConversationTurn {
    fn text(&self) -> Option<&str>;
}

impl ConversationTurn for &str {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl ConversationTurn for String {
    fn text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

/// Fold every history message (oldest first), then the current message.
///
/// Turns without text contribute nothing. No state survives the call.
pub fn compute_cumulative_intelligence<T: ConversationTurn>(
    current: &str,
    history: &[T],
) -> ExtractedIntelligence {
    analyze_turn(current, history).aggregate
}

/// Aggregates before and after the current message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnIntelligence {
    /// Everything the history alone produced.
    pub history: ExtractedIntelligence,
    /// History plus the current message.
    pub aggregate: ExtractedIntelligence,
}

impl TurnIntelligence {
    /// True when the current message added any tracked entity.
    pub fn has_fresh_intel(&self) -> bool {
        self.aggregate
            .fields()
            .iter()
            .zip(self.history.fields().iter())
            .filter(|((name, _), _)| crate::types::TRACKED_FIELDS.contains(name))
            .any(|((_, after), (_, before))| after.len() > before.len())
    }
}

pub fn analyze_turn<T: ConversationTurn>(current: &str, history: &[T]) -> TurnIntelligence {
    let history_aggregate = history
        .iter()
        .filter_map(|turn| turn.text())
        .fold(ExtractedIntelligence::default(), |acc, text| merge(&acc, &extract(text)));
    let aggregate = merge(&history_aggregate, &extract(current));

    tracing::debug!(
        history_len = history.len(),
        items = aggregate.total_items(),
        "computed cumulative intelligence"
    );

    TurnIntelligence {
        history: history_aggregate,
        aggregate,
    }
}
