//! Case, policy, and order reference codes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::dedup_case_insensitive;

static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+(?:[-/][A-Za-z0-9]+)*$").unwrap());
/// Context-free shape such as `ABC-12345` or `REF-2026-001`.
static PREFIXED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z]{2,5})-[0-9]{3,}(?:-[0-9]+)*\b").unwrap());

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());

const MIN_CODE_LEN: usize = 3;
/// Tokens after a keyword that may hold its code.
const WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Case,
    Policy,
    Order,
}

impl ReferenceKind {
    fn from_keyword(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "case" | "reference" | "ref" | "complaint" | "ticket" | "incident" | "fir" => {
                Some(Self::Case)
            }
            "policy" | "pol" => Some(Self::Policy),
            "order" | "transaction" | "txn" => Some(Self::Order),
            _ => None,
        }
    }

    fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "POL" => Self::Policy,
            "ORD" | "TXN" | "TRX" => Self::Order,
            _ => Self::Case,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct References {
    pub case_ids: Vec<String>,
    pub policy_numbers: Vec<String>,
    pub order_numbers: Vec<String>,
}

impl References {
    fn push(&mut self, kind: ReferenceKind, code: String) {
        match kind {
            ReferenceKind::Case => self.case_ids.push(code),
            ReferenceKind::Policy => self.policy_numbers.push(code),
            ReferenceKind::Order => self.order_numbers.push(code),
        }
    }

    fn dedup(self) -> Self {
        Self {
            case_ids: dedup_case_insensitive(self.case_ids),
            policy_numbers: dedup_case_insensitive(self.policy_numbers),
            order_numbers: dedup_case_insensitive(self.order_numbers),
        }
    }
}

/// Extract reference codes near a keyword and context-free prefixed codes,
/// each list in text order.
pub fn extract_references(text: &str) -> References {
    let mut found: Vec<(usize, ReferenceKind, String)> = Vec::new();
    let tokens: Vec<(usize, &str)> = TOKEN_RE
        .find_iter(text)
        .map(|m| (m.start(), m.as_str()))
        .collect();

    for (i, &(start, token)) in tokens.iter().enumerate() {
        let trimmed = trim_token(token);
        // "Ref.No.12345" carries both the keyword and the code.
        let (head, tail) = match trimmed.find(&['.', ':', '#'][..]) {
            Some(pos) => (&trimmed[..pos], Some((start, &trimmed[pos + 1..]))),
            None => (trimmed, None),
        };
        let Some(kind) = ReferenceKind::from_keyword(head) else {
            continue;
        };

        let window = tail
            .into_iter()
            .chain(tokens.iter().skip(i + 1).take(WINDOW).copied());
        for (at, candidate) in window {
            if ReferenceKind::from_keyword(trim_token(candidate)).is_some() {
                break;
            }
            if let Some(code) = as_code(candidate) {
                found.push((at, kind, code.to_string()));
                break;
            }
        }
    }

    for cap in PREFIXED_RE.captures_iter(text) {
        let (Some(whole), Some(prefix)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        found.push((
            whole.start(),
            ReferenceKind::from_prefix(prefix.as_str()),
            whole.as_str().to_string(),
        ));
    }

    found.sort_by_key(|(start, _, _)| *start);
    let mut refs = References::default();
    for (_, kind, code) in found {
        refs.push(kind, code);
    }
    refs.dedup()
}

fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Normalize a token to a code: "No.04137874" and "ID:AB123" keep only the part after the separator.
fn as_code(token: &str) -> Option<&str> {
    let trimmed = trim_token(token);
    let code = match trimmed.rfind(&['.', ':', '#'][..]) {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    };
    let valid = code.len() >= MIN_CODE_LEN
        && code.chars().any(|c| c.is_ascii_digit())
        && CODE_RE.is_match(code);
    valid.then_some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_codes() {
        let refs = extract_references("Case REF-2026-001, policy POL-778899, order ORD-556677.");
        assert_eq!(refs.case_ids, vec!["REF-2026-001"]);
        assert_eq!(refs.policy_numbers, vec!["POL-778899"]);
        assert_eq!(refs.order_numbers, vec!["ORD-556677"]);
    }

    #[test]
    fn test_window_skips_filler_words() {
        let refs = extract_references("your complaint no: CMP12345 is pending");
        assert_eq!(refs.case_ids, vec!["CMP12345"]);
        let refs = extract_references("Transaction ID:TX998877 failed");
        assert_eq!(refs.order_numbers, vec!["TX998877"]);
    }

    #[test]
    fn test_keyword_with_attached_code() {
        let refs = extract_references("Ref.No.04137874 please note");
        assert_eq!(refs.case_ids, vec!["04137874"]);
    }

    #[test]
    fn test_code_needs_digit_and_length() {
        let refs = extract_references("the case is closed, order now");
        assert_eq!(refs, References::default());
        let refs = extract_references("ticket 12 raised");
        assert!(refs.case_ids.is_empty());
    }

    #[test]
    fn test_window_stops_at_next_keyword() {
        let refs = extract_references("policy order 55512 shipped");
        assert!(refs.policy_numbers.is_empty());
        assert_eq!(refs.order_numbers, vec!["55512"]);
    }

    #[test]
    fn test_prefixed_code_without_context() {
        let refs = extract_references("Quote ABC-12345 and TXN-4455 to the agent");
        assert_eq!(refs.case_ids, vec!["ABC-12345"]);
        assert_eq!(refs.order_numbers, vec!["TXN-4455"]);
    }

    #[test]
    fn test_keyword_and_prefixed_codes_in_text_order() {
        let refs = extract_references("Quote ABC-12345 then case 99999");
        assert_eq!(refs.case_ids, vec!["ABC-12345", "99999"]);
        let refs = extract_references("ticket 55501 and REF-2026-001");
        assert_eq!(refs.case_ids, vec!["55501", "REF-2026-001"]);
    }

    #[test]
    fn test_slash_segmented_fir() {
        let refs = extract_references("FIR 2231/2026 has been registered");
        assert_eq!(refs.case_ids, vec!["2231/2026"]);
    }
}
