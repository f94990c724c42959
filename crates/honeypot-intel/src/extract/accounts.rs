//! Bank and card account numbers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::dedup_case_insensitive;

/// Digit run introduced by an account marker ("A/C No:", "account number", "acct").
/// Digit classes are ASCII-only; `\d` would also accept other scripts' digits.
static CONTEXT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:a/c|acct|account)(?:\s*(?:no|number|num))?\.?[\s.:#-]*([0-9]{9,18})\b")
        .unwrap()
});
static BARE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[0-9]{9,18}\b").unwrap());

/// Bare runs in this range are accepted without a marker.
const BARE_MIN_LEN: usize = 11;
const BARE_MAX_LEN: usize = 16;

/// Extract account numbers in text order, from context-marked and bare runs.
pub fn extract_bank_accounts(text: &str) -> Vec<String> {
    let mut found: Vec<(usize, &str)> = Vec::new();

    for cap in CONTEXT_RE.captures_iter(text) {
        if let Some(m) = cap.get(1) {
            if !is_rejected_shape(m.as_str()) {
                found.push((m.start(), m.as_str()));
            }
        }
    }

    for m in BARE_RE.find_iter(text) {
        let digits = m.as_str();
        if text[..m.start()].ends_with('+') {
            // "+919876543210" is a phone number with its country code attached
            continue;
        }
        if (BARE_MIN_LEN..=BARE_MAX_LEN).contains(&digits.len()) && !is_rejected_shape(digits) {
            found.push((m.start(), digits));
        }
    }

    found.sort_by_key(|(start, _)| *start);
    dedup_case_insensitive(found.into_iter().map(|(_, digits)| digits.to_string()))
}

/// A 10-digit run shaped like a mobile number or a unix-epoch timestamp.
pub fn is_rejected_shape(digits: &str) -> bool {
    if digits.len() != 10 {
        return false;
    }
    let mobile = matches!(digits.as_bytes()[0], b'6'..=b'9');
    let epoch = ["16", "17", "18"].iter().any(|p| digits.starts_with(p));
    mobile || epoch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_marked_account() {
        assert_eq!(
            extract_bank_accounts("Transfer to A/C No: 123456789012 immediately"),
            vec!["123456789012"]
        );
        assert_eq!(
            extract_bank_accounts("account number 1234567890123456 needs verification"),
            vec!["1234567890123456"]
        );
    }

    #[test]
    fn test_context_allows_short_runs() {
        assert_eq!(extract_bank_accounts("acct 123456789"), vec!["123456789"]);
        // A bare 9-digit run has no marker and is ignored.
        assert!(extract_bank_accounts("ref 123456789").is_empty());
    }

    #[test]
    fn test_bare_run_in_accepted_range() {
        assert_eq!(
            extract_bank_accounts("send to 9876543210123 today"),
            vec!["9876543210123"]
        );
        assert!(extract_bank_accounts("value 12345678901234567").is_empty());
    }

    #[test]
    fn test_mobile_shape_rejected_even_with_context() {
        assert!(extract_bank_accounts("Call 9876543210 immediately").is_empty());
        assert!(extract_bank_accounts("account 9876543210").is_empty());
    }

    #[test]
    fn test_epoch_shape_rejected() {
        assert!(extract_bank_accounts("account 1730000000").is_empty());
        assert!(is_rejected_shape("1600000000"));
        assert!(!is_rejected_shape("1234567890"));
    }

    #[test]
    fn test_plain_ten_digit_account_with_context() {
        assert_eq!(extract_bank_accounts("a/c 1234567890"), vec!["1234567890"]);
    }

    #[test]
    fn test_plus_prefixed_run_skipped() {
        assert!(extract_bank_accounts("+919876543210").is_empty());
    }

    #[test]
    fn test_text_order_across_passes() {
        assert_eq!(
            extract_bank_accounts("send to 98765432101234 or account 123456789"),
            vec!["98765432101234", "123456789"]
        );
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        // Devanagari digits, 30 bytes long.
        assert!(extract_bank_accounts("account \u{96f}\u{96e}\u{96d}\u{96c}\u{96b}\u{96a}\u{969}\u{968}\u{967}\u{966} now").is_empty());
        assert!(extract_bank_accounts("send to \u{967}\u{968}\u{969}\u{96a}\u{96b}\u{96c}\u{96d}\u{96e}\u{96f}\u{966}\u{967}\u{968}").is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let accounts = extract_bank_accounts(
            "Account 1234567890123456. Again: 1234567890123456 and 1234567890123456",
        );
        assert_eq!(accounts, vec!["1234567890123456"]);
    }
}
