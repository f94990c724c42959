//! Scam classification: strong heuristics first, then the LLM, then a keyword score.

use std::sync::Arc;

use async_trait::async_trait;
use honeypot_intel::extract::links::extract_links;
use honeypot_intel::{categories_present, KeywordCategory};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::providers::ChatBackend;
use crate::scam_type::contains_term;
use crate::types::{ChatMessage, HistoryLine};

/// History turns given to the classifier as context.
const CONTEXT_TURNS: usize = 3;
const STRONG_CONFIDENCE: f64 = 0.9;
const KEYWORD_SCAM_THRESHOLD: f64 = 0.5;

/// Domains whose links are treated as genuine in automated notices.
pub const LEGITIMATE_DOMAINS: &[&str] = &[
    "sbi.co.in",
    "onlinesbi.sbi",
    "hdfcbank.com",
    "icicibank.com",
    "axisbank.com",
    "kotak.com",
    "pnbindia.in",
    "bankofbaroda.in",
    "paytm.com",
    "phonepe.com",
    "pay.google.com",
    "amazon.in",
    "amazon.com",
    "flipkart.com",
    "npci.org.in",
    "rbi.org.in",
    "uidai.gov.in",
    "incometax.gov.in",
    "india.gov.in",
];

const PAYMENT_REQUEST: &[&str] = &[
    "transfer",
    "send money",
    "pay",
    "deposit",
    "send rs",
    "processing fee",
    "refundable fee",
];

/// Markers of a machine-generated bank/wallet notification.
const NOTICE_MARKERS: &[&str] = &[
    "debited",
    "credited",
    "avl bal",
    "available balance",
    "is your otp",
    "do not share",
    "never share",
    "never ask",
];

/// Outcome of classifying one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScamVerdict {
    pub is_scam: bool,
    pub confidence: f64,
    pub patterns: Vec<String>,
    pub reasoning: String,
}

impl ScamVerdict {
    /// Verdict used once a conversation is deep enough that scam intent is assumed.
    pub fn established() -> Self {
        Self {
            is_scam: true,
            confidence: 1.0,
            patterns: vec!["established_context".into()],
            reasoning: "Conversation depth implies established context.".into(),
        }
    }

    fn not_scam(reasoning: impl Into<String>) -> Self {
        Self {
            is_scam: false,
            confidence: 0.0,
            patterns: Vec::new(),
            reasoning: reasoning.into(),
        }
    }
}

#[async_trait]
pub trait ScamClassifier: Send + Sync {
    async fn classify(&self, text: &str, history: &[HistoryLine]) -> ScamVerdict;
}

/// Heuristics, then an optional LLM, then a keyword score.
pub struct HybridClassifier {
    backend: Option<Arc<dyn ChatBackend>>,
}

impl HybridClassifier {
    pub fn new(backend: Option<Arc<dyn ChatBackend>>) -> Self {
        Self { backend }
    }

    pub fn heuristic_only() -> Self {
        Self { backend: None }
    }
}

#[async_trait]
impl ScamClassifier for HybridClassifier {
    async fn classify(&self, text: &str, history: &[HistoryLine]) -> ScamVerdict {
        let context = context_window(text, history);

        if let Some(verdict) = strong_indicators(&context) {
            debug!(patterns = ?verdict.patterns, "strong scam indicators");
            return verdict;
        }

        if is_automated_notice(text) {
            return ScamVerdict::not_scam("Automated notification with legitimate links only.");
        }

        if let Some(backend) = &self.backend {
            let messages = vec![
                ChatMessage::system(CLASSIFIER_PROMPT),
                ChatMessage::user(classifier_input(text, history)),
            ];
            match backend.complete(&messages, 0.0, 200).await {
                Ok(raw) => match parse_llm_verdict(&raw) {
                    Some(verdict) => return verdict,
                    None => warn!("classifier returned unparseable JSON, using keyword score"),
                },
                Err(e) => warn!(error = %e, "classifier backend failed, using keyword score"),
            }
        }

        keyword_verdict(&context)
    }
}

const CLASSIFIER_PROMPT: &str = "You detect financial scams and fraud in chat messages. \
Answer is_scam true if the message threatens to block or suspend an account, demands urgent \
verification or KYC, asks for a UPI PIN, password, OTP or card details, offers an unsolicited \
lottery, prize or job, or pushes a link asking for login. \
Respond with strict JSON only: \
{\"is_scam\": boolean, \"confidence\": number between 0 and 1, \"reasoning\": \"short explanation\", \
\"detected_patterns\": [\"keyword\", ...]}";

fn classifier_input(text: &str, history: &[HistoryLine]) -> String {
    let mut input = format!("Incoming message: \"{text}\"");
    let start = history.len().saturating_sub(CONTEXT_TURNS);
    if start < history.len() {
        input.push_str("\nPrevious conversation:");
        for line in &history[start..] {
            input.push_str(&format!("\n{}: {}", line.sender, line.text));
        }
    }
    input
}

/// Current message plus the last few history turns, lowercased.
fn context_window(text: &str, history: &[HistoryLine]) -> String {
    let start = history.len().saturating_sub(CONTEXT_TURNS);
    let mut context = text.to_lowercase();
    for line in &history[start..] {
        context.push('\n');
        context.push_str(&line.text.to_lowercase());
    }
    context
}

fn asks_for_payment(lower: &str) -> bool {
    PAYMENT_REQUEST.iter().any(|term| contains_term(lower, term))
}

fn category_label(category: KeywordCategory) -> &'static str {
    match category {
        KeywordCategory::Urgency => "urgency",
        KeywordCategory::CredentialRequest => "credential_request",
        KeywordCategory::MonetaryLure => "monetary_lure",
        KeywordCategory::LegalThreat => "legal_threat",
        KeywordCategory::TechInstall => "tech_install",
        KeywordCategory::Kyc => "kyc",
    }
}

/// Combinations that are scams regardless of what a model would say.
fn strong_indicators(context: &str) -> Option<ScamVerdict> {
    let categories = categories_present(context);
    let has = |c: KeywordCategory| categories.contains(&c);
    let pressure = has(KeywordCategory::Urgency) || has(KeywordCategory::LegalThreat);
    let credential = has(KeywordCategory::CredentialRequest) && !has_safety_phrase(context);
    let payment = asks_for_payment(context);
    let links = !extract_links(context).is_empty();

    let rule = if pressure && credential {
        Some("pressure plus credential request")
    } else if pressure && payment {
        Some("pressure plus payment request")
    } else if credential && links {
        Some("credential request with link")
    } else if has(KeywordCategory::TechInstall) && (pressure || credential) {
        Some("remote-access install under pressure")
    } else if has(KeywordCategory::MonetaryLure) && payment {
        Some("prize or reward conditional on payment")
    } else {
        None
    }?;

    let mut patterns: Vec<String> = categories
        .iter()
        .map(|c| category_label(*c).to_string())
        .collect();
    if payment {
        patterns.push("payment_request".into());
    }
    let confidence = (STRONG_CONFIDENCE + 0.02 * categories.len() as f64).min(0.99);
    Some(ScamVerdict {
        is_scam: true,
        confidence,
        patterns,
        reasoning: format!("Strong scam indicators: {rule}."),
    })
}

fn has_safety_phrase(lower: &str) -> bool {
    ["do not share", "don't share", "never share", "never ask"]
        .iter()
        .any(|p| lower.contains(p))
}

/// A machine-generated notice: notice markers, only legitimate links, and no coercion.
pub fn is_automated_notice(text: &str) -> bool {
    let lower = text.to_lowercase();
    if !NOTICE_MARKERS.iter().any(|m| lower.contains(m)) {
        return false;
    }
    if !extract_links(text).iter().all(|link| is_legitimate_url(link)) {
        return false;
    }
    let categories = categories_present(&lower);
    let coercive = categories.iter().any(|c| {
        matches!(
            c,
            KeywordCategory::Urgency
                | KeywordCategory::LegalThreat
                | KeywordCategory::TechInstall
                | KeywordCategory::MonetaryLure
        )
    });
    !coercive && !asks_for_payment(&lower)
}

/// True when the link's host is, or is a subdomain of, a known legitimate domain.
///
/// The host comes from a real URL parse, so userinfo tricks (`https://sbi.co.in@evil.com`)
/// and look-alike suffixes (`sbi.co.in.evil.com`, `fakesbi.co.in`) do not pass.
/// Default ports are normalized away; any other explicit port is rejected.
pub fn is_legitimate_url(link: &str) -> bool {
    let Ok(url) = Url::parse(link) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") || url.port().is_some() {
        return false;
    }
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.trim_end_matches('.').to_lowercase();
    LEGITIMATE_DOMAINS
        .iter()
        .any(|d| host == *d || host.ends_with(&format!(".{d}")))
}

#[derive(Deserialize)]
struct LlmVerdict {
    #[serde(default)]
    is_scam: bool,
    #[serde(default)]
    confidence: f64,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    detected_patterns: Vec<String>,
}

/// Parse the model's JSON, tolerating markdown fences and surrounding prose.
pub fn parse_llm_verdict(raw: &str) -> Option<ScamVerdict> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end < start {
        return None;
    }
    let parsed: LlmVerdict = serde_json::from_str(&cleaned[start..=end]).ok()?;
    Some(ScamVerdict {
        is_scam: parsed.is_scam,
        confidence: parsed.confidence.clamp(0.0, 1.0),
        patterns: parsed.detected_patterns,
        reasoning: parsed.reasoning,
    })
}

/// Last-resort score from vocabulary categories, payment requests and links.
fn keyword_verdict(context: &str) -> ScamVerdict {
    let categories = categories_present(context);
    let mut score = 0.25 * categories.len() as f64;
    let mut patterns: Vec<String> = categories
        .iter()
        .map(|c| category_label(*c).to_string())
        .collect();
    if asks_for_payment(context) {
        score += 0.25;
        patterns.push("payment_request".into());
    }
    if extract_links(context).iter().any(|l| !is_legitimate_url(l)) {
        score += 0.25;
        patterns.push("unverified_link".into());
    }
    let confidence = score.min(0.85);
    let is_scam = confidence >= KEYWORD_SCAM_THRESHOLD;
    ScamVerdict {
        is_scam,
        confidence,
        reasoning: if is_scam {
            format!("Keyword analysis matched {}.", patterns.join(", "))
        } else {
            "No strong scam indicators.".into()
        },
        patterns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::tests::StubBackend;

    #[tokio::test]
    async fn test_strong_indicators_skip_llm() {
        let backend = StubBackend::ok("stub", r#"{"is_scam": false}"#);
        let classifier = HybridClassifier::new(Some(backend.clone() as Arc<dyn ChatBackend>));
        let verdict = classifier
            .classify("URGENT: your account will be blocked. Share OTP immediately.", &[])
            .await;
        assert!(verdict.is_scam);
        assert!(verdict.confidence >= 0.85);
        assert!(verdict.patterns.contains(&"credential_request".to_string()));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_bank_otp_notice_is_not_scam() {
        let classifier = HybridClassifier::heuristic_only();
        let verdict = classifier
            .classify(
                "123456 is your OTP for txn of Rs 500 at Amazon. Do not share it with anyone. \
                 Details: https://www.sbi.co.in/alerts",
                &[],
            )
            .await;
        assert!(!verdict.is_scam);
    }

    #[tokio::test]
    async fn test_llm_verdict_used_when_no_strong_signal() {
        let backend = StubBackend::ok(
            "stub",
            "```json\n{\"is_scam\": true, \"confidence\": 0.7, \"reasoning\": \"job lure\", \"detected_patterns\": [\"job\"]}\n```",
        );
        let classifier = HybridClassifier::new(Some(backend.clone() as Arc<dyn ChatBackend>));
        let verdict = classifier.classify("Hello, are you looking for a job?", &[]).await;
        assert!(verdict.is_scam);
        assert_eq!(verdict.confidence, 0.7);
        assert_eq!(verdict.patterns, vec!["job"]);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_keyword_fallback_when_llm_fails() {
        let classifier = HybridClassifier::new(Some(StubBackend::failing("down") as Arc<dyn ChatBackend>));
        let verdict = classifier
            .classify("Congratulations, lottery prize! Claim at http://claim-now.xyz/win", &[])
            .await;
        assert!(verdict.is_scam);
        assert!(verdict.patterns.contains(&"unverified_link".to_string()));

        let benign = classifier.classify("Are we meeting for lunch?", &[]).await;
        assert!(!benign.is_scam);
    }

    #[tokio::test]
    async fn test_history_gives_context() {
        let classifier = HybridClassifier::heuristic_only();
        let history = vec![HistoryLine::new("scammer", "This is the police. Legal action is pending.")];
        let verdict = classifier.classify("Transfer the fine now", &history).await;
        assert!(verdict.is_scam);
    }

    #[test]
    fn test_legitimate_urls() {
        assert!(is_legitimate_url("https://www.sbi.co.in/web/personal"));
        assert!(is_legitimate_url("https://sbi.co.in:443/"));
        assert!(is_legitimate_url("HTTPS://WWW.HDFCBANK.COM/"));
        assert!(!is_legitimate_url("https://sbi.co.in.verify-kyc.com/login"));
        assert!(!is_legitimate_url("https://fakesbi.co.in/"));
        assert!(!is_legitimate_url("https://sbi.co.in@evil.example/login"));
        assert!(!is_legitimate_url("https://sbi.co.in:8443/login"));
        assert!(!is_legitimate_url("ftp://sbi.co.in/"));
        assert!(!is_legitimate_url("not a url"));
    }

    #[test]
    fn test_parse_llm_verdict() {
        let v = parse_llm_verdict("Sure! {\"is_scam\": true, \"confidence\": 1.7}").unwrap();
        assert!(v.is_scam);
        assert_eq!(v.confidence, 1.0);
        assert!(parse_llm_verdict("no json here").is_none());
        assert!(parse_llm_verdict("} {").is_none());
    }

    #[test]
    fn test_established_verdict() {
        let v = ScamVerdict::established();
        assert!(v.is_scam);
        assert_eq!(v.patterns, vec!["established_context"]);
    }
}
