//! Victim-persona reply generation.

use std::sync::Arc;

use async_trait::async_trait;
use honeypot_intel::ExtractedIntelligence;
use tracing::{debug, warn};

use crate::config::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::providers::ChatBackend;
use crate::types::{ChatMessage, HistoryLine};

/// Reply sent when the message is not judged a scam.
pub const NOT_SCAM_REPLY: &str = "I'm sorry, I didn't understand that. Who is this?";

/// Last-resort reply when nothing else is available.
pub const FALLBACK_REPLY: &str = "I am confused. Can you please call me?";

/// History turns included in the prompt.
const PROMPT_HISTORY_TURNS: usize = 10;

/// Everything the persona needs to answer one turn.
#[derive(Debug, Clone, Default)]
pub struct ReplyContext {
    pub current_message: String,
    pub history: Vec<HistoryLine>,
    pub intel: ExtractedIntelligence,
    pub language: String,
    pub channel: String,
    /// 1-based turn number of the current message.
    pub turn: usize,
}

#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Always yields a reply; failures degrade to canned persona text.
    async fn generate(&self, ctx: &ReplyContext) -> String;
}

/// Plays a credulous, slightly confused elderly victim.
pub struct PersonaReplyGenerator {
    backend: Arc<dyn ChatBackend>,
    temperature: f64,
    max_tokens: usize,
}

impl PersonaReplyGenerator {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn build_messages(ctx: &ReplyContext) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(system_prompt(ctx))];

        let start = ctx.history.len().saturating_sub(PROMPT_HISTORY_TURNS);
        for line in &ctx.history[start..] {
            if line.is_from_scammer() {
                messages.push(ChatMessage::user(line.text.clone()));
            } else {
                messages.push(ChatMessage::assistant(line.text.clone()));
            }
        }
        messages.push(ChatMessage::user(ctx.current_message.clone()));
        messages
    }
}

#[async_trait]
impl ReplyGenerator for PersonaReplyGenerator {
    async fn generate(&self, ctx: &ReplyContext) -> String {
        let messages = Self::build_messages(ctx);
        match self
            .backend
            .complete(&messages, self.temperature, self.max_tokens)
            .await
        {
            Ok(text) => {
                let reply = clean_reply(&text);
                if reply.is_empty() {
                    stalling_reply(ctx)
                } else {
                    debug!(turn = ctx.turn, "persona reply generated");
                    reply
                }
            }
            Err(e) => {
                warn!(error = %e, turn = ctx.turn, "reply generation failed, using canned reply");
                stalling_reply(ctx)
            }
        }
    }
}

fn system_prompt(ctx: &ReplyContext) -> String {
    let language = if ctx.language.trim().is_empty() {
        "English"
    } else {
        ctx.language.as_str()
    };
    let channel = if ctx.channel.trim().is_empty() {
        "SMS"
    } else {
        ctx.channel.as_str()
    };
    let gaps = ctx.intel.gaps();
    let wanted = if gaps.is_empty() {
        "Keep them talking; ask them to repeat or confirm the details they gave.".to_string()
    } else {
        let asks: Vec<&str> = gaps.iter().map(|g| gap_question(g)).collect();
        format!("You still need to find out: {}.", asks.join("; "))
    };

    format!(
        "You are an elderly retired person in India who is not comfortable with technology. \
You believe the sender may be from your bank or an official authority.\n\
Reply in {language}. If they mix languages (Hinglish, Tanglish), mirror their style.\n\
This is a {channel} conversation: keep replies to one or two short sentences.\n\
Rules: never reveal you suspect a scam; act worried but cooperative; make small mistakes \
(a failed payment, a mistyped number) so they must send details again; ask clarifying \
questions that make them reveal account numbers, payment IDs, links, phone numbers or emails.\n\
{wanted}"
    )
}

fn gap_question(field: &str) -> &'static str {
    match field {
        "bankAccounts" => "which bank account number to use",
        "upiIds" => "which UPI ID to pay",
        "phishingLinks" => "the website link to open",
        "phoneNumbers" => "a phone number to call back",
        "emailAddresses" => "an email address to write to",
        _ => "more details",
    }
}

/// Strip quoting and role prefixes models sometimes add.
fn clean_reply(text: &str) -> String {
    let mut reply = text.trim().trim_matches('"').trim();
    for prefix in ["Reply:", "Victim:", "Me:", "User:"] {
        if let Some(rest) = reply.strip_prefix(prefix) {
            reply = rest.trim();
        }
    }
    reply.trim_matches('"').trim().to_string()
}

/// In-character stalling reply, chosen from the turn number and the first intel gap.
pub fn stalling_reply(ctx: &ReplyContext) -> String {
    let gap = ctx.intel.gaps().into_iter().next();
    let options: &[&str] = match gap {
        Some("upiIds") => &[
            "Beta, my UPI app is showing error. Which UPI ID should I send to again?",
            "I tried to pay but it failed. Can you send the UPI ID once more?",
        ],
        Some("bankAccounts") => &[
            "Which account number should I transfer to? Please write it slowly.",
            "My son handles the bank things. Tell me the account number, I will note it down.",
        ],
        Some("phishingLinks") => &[
            "Where do I click? Please send the link again, I cannot find it.",
            "The page is not opening. Can you share the website link once more?",
        ],
        Some("phoneNumbers") => &[
            "I am confused. Can you please give me a number to call you?",
            "My phone is old, messages are not coming properly. What number can I call?",
        ],
        Some("emailAddresses") => &[
            "Can I send the documents by email? What is your email address?",
            "My grandson says to confirm by email. Which email should I write to?",
        ],
        _ => &[
            FALLBACK_REPLY,
            "Sorry, my eyes are weak. Can you explain once more what I should do?",
            "Please wait, I am looking for my reading glasses. What did you say?",
        ],
    };
    options[ctx.turn % options.len()].to_string()
}
